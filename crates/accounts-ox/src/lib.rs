#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Client core of the accounts console
//!
//! [`Accounts`] talks to the accounts API, [`SessionStore`] owns the tab-wide
//! authentication state and [`InvitationController`] drives the invitation page.

mod client;
pub mod error;
mod internal;
pub mod invitation;
pub mod navigation;
pub mod organization;
pub mod prelude;
pub mod security;
pub mod session;
pub mod user;

// Re-export main types
pub use client::Accounts;
pub use error::AccountsRequestError;
pub use invitation::{InvitationController, InvitationState};
pub use navigation::{ConsoleRoutes, Gate, Navigator};
pub use session::{SessionSnapshot, SessionState, SessionStore};

// Re-export types from accounts-ox-common for convenience
pub use accounts_ox_common::{ErrorKind, LogNotifier, Notifier, NotifyKind};

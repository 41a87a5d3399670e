#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Shared HTTP gateway abstractions for the accounts console
//!
//! Every outbound call of the console goes through [`RequestBuilder`]: it carries the
//! session cookie, the fixed API base path and a JSON content type, normalizes failures
//! into [`ApiError`] and fires a user-facing notification for structured validation
//! failures.

pub mod envelope;
pub mod error;
pub mod notify;
pub mod request_builder;

pub use envelope::ApiResponse;
pub use error::{ApiError, ErrorKind};
pub use notify::{LogNotifier, Notifier, NotifyKind};
pub use request_builder::{Endpoint, HttpMethod, RequestBuilder, RequestConfig};

/// Re-export common types for convenience
pub use serde::{Deserialize, Serialize};

//! Everything a console screen usually needs in one import.

pub use crate::{
    Accounts, AccountsRequestError, ConsoleRoutes, ErrorKind, Gate, InvitationController,
    InvitationState, LogNotifier, Navigator, Notifier, NotifyKind, SessionSnapshot, SessionState,
    SessionStore,
    invitation::{ClaimForm, InvitationDetails, InvitationToken},
    navigation::{login_redirect_url, redirect_target},
    organization::{InitData, Organization},
    security::UserSession,
    user::{LoginRequest, SignupRequest, User, UserSource, UserStatus},
};

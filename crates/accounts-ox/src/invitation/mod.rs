//! Invitation links: resolving a token, claiming a shadow account, joining an organization.

mod controller;
pub mod details;
pub mod form;

pub use controller::{
    CLAIM_FAILED_MESSAGE, CLAIMED_MESSAGE, FETCH_FAILED_MESSAGE, InvitationController,
    InvitationState, JOIN_FAILED_MESSAGE, JOINED_MESSAGE, MISSING_TOKEN_MESSAGE,
    is_already_joined,
};
pub use details::{ClaimAccountRequest, InvitationDetails, InvitationToken};
pub use form::{ClaimForm, FormError, MIN_PASSWORD_LEN, validate_password};

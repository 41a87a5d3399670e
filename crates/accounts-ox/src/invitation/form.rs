use thiserror::Error;

use super::details::{ClaimAccountRequest, InvitationDetails, InvitationToken};

/// Minimum password length accepted client-side; the server remains the authority.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Client-side form validation failures, raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Password must be at least 8 characters.")]
    PasswordTooShort,
    #[error("First name is required.")]
    FirstNameRequired,
}

pub fn validate_password(password: &str) -> Result<(), FormError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FormError::PasswordTooShort);
    }
    Ok(())
}

/// Claim form shown to brand-new invitees.
///
/// Names are pre-filled from the invitation and editable; the email is displayed but
/// cannot be changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimForm {
    email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl ClaimForm {
    pub fn prefilled(details: &InvitationDetails) -> Self {
        Self {
            email: details.email.clone(),
            first_name: details.first_name.clone().unwrap_or_default(),
            last_name: details.last_name.clone().unwrap_or_default(),
            password: String::new(),
        }
    }

    /// The invited address, rendered read-only.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.first_name.trim().is_empty() {
            return Err(FormError::FirstNameRequired);
        }
        validate_password(&self.password)
    }

    pub(crate) fn into_request(self, token: InvitationToken) -> ClaimAccountRequest {
        let last_name = self.last_name.trim();
        ClaimAccountRequest {
            token,
            password: self.password,
            first_name: self.first_name.trim().to_string(),
            last_name: (!last_name.is_empty()).then(|| last_name.to_string()),
        }
    }
}

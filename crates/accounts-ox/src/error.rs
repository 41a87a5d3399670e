// Re-export shared error types from accounts-ox-common
pub use accounts_ox_common::error::{ApiError, ErrorKind, parse_error_response};

/// Error type returned by every [`crate::Accounts`] operation
pub type AccountsRequestError = ApiError;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// `{success, message, data}` body returned by every accounts endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    /// Absent on some probes (e.g. the session-status endpoint), which only carry `data`.
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

fn default_success() -> bool {
    true
}

impl<T> ApiResponse<T> {
    /// Fails with [`ApiError::Rejected`] when the envelope reports `success: false`.
    pub fn into_result(self) -> Result<Self, ApiError> {
        if self.success {
            Ok(self)
        } else {
            Err(ApiError::Rejected(
                self.message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            ))
        }
    }

    /// Unwraps the payload of a successful envelope.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.into_result()?
            .data
            .ok_or_else(|| ApiError::UnexpectedResponse("response is missing `data`".to_string()))
    }

    /// Checks success and keeps only the server message.
    pub fn into_message(self) -> Result<Option<String>, ApiError> {
        Ok(self.into_result()?.message)
    }
}

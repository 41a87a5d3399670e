use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Categorizes errors for page-level handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was received
    Transport,
    /// Structured 400 with a message; the user has already been notified
    Validation,
    /// 401, left to page-level gating
    Authentication,
    /// The server answered but refused or failed the operation
    Server,
    /// The response could not be understood
    Decode,
}

/// Errors produced by the accounts API gateway
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structured `400 {success:false, message}` response
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// 401 from the server
    #[error("Unauthenticated: {}", message.as_deref().unwrap_or("no valid session"))]
    Unauthorized { message: Option<String> },

    /// Any other non-2xx status
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("request failed"))]
    Status { status: u16, message: Option<String> },

    /// 2xx response whose envelope reports `success: false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Response body did not match the expected envelope
    #[error("Unexpected response from API: {0}")]
    UnexpectedResponse(String),
}

impl ApiError {
    /// Returns the error kind for page-level handling
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(e) if e.is_decode() => ErrorKind::Decode,
            Self::Http(_) => ErrorKind::Transport,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Unauthorized { .. } => ErrorKind::Authentication,
            Self::Status { .. } | Self::Rejected(_) => ErrorKind::Server,
            Self::Json(_) | Self::UnexpectedResponse(_) => ErrorKind::Decode,
        }
    }

    /// The message the server attached to the failure, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Validation { message } | Self::Rejected(message) => Some(message),
            Self::Unauthorized { message } | Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the gateway already emitted a user-facing notification for this error.
    ///
    /// Callers may add inline handling but must not notify again when this is true.
    pub fn is_notified(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Error body shared by every endpoint of the accounts API
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

/// Parse a non-2xx response into an [`ApiError`]
pub fn parse_error_response(status: StatusCode, body: &bytes::Bytes) -> ApiError {
    let envelope = serde_json::from_slice::<ErrorEnvelope>(body).ok();
    let message = envelope
        .as_ref()
        .and_then(|e| e.message.clone())
        .filter(|m| !m.trim().is_empty());
    let structured_failure = envelope.as_ref().is_some_and(|e| e.success == Some(false));

    match status {
        StatusCode::BAD_REQUEST if structured_failure && message.is_some() => {
            ApiError::Validation {
                message: message.unwrap_or_default(),
            }
        }
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized { message },
        _ => {
            if message.is_none() && !body.is_empty() {
                log::debug!(
                    "HTTP {} without error envelope: {}",
                    status.as_u16(),
                    String::from_utf8_lossy(body).trim()
                );
            }
            ApiError::Status {
                status: status.as_u16(),
                message,
            }
        }
    }
}

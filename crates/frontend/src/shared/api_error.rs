//! Error type shared by every HTTP service wrapper.

use thiserror::Error;

/// Failure of a call to the pay API.
///
/// `Clone` so one failed request can be handed to every caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("failed to send request: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to parse response: {0}")]
    Decode(String),
    #[error("failed to serialize request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// HTTP status code, when the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_qs::Error> for ApiError {
    fn from(e: serde_qs::Error) -> Self {
        Self::Encode(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e.to_string())
    }
}

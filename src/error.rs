//! Application Errors
//!
//! Every failure a user action can hit, local or remote.

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Fallback when the server rejects a request without a message
pub const GENERIC_API_MESSAGE: &str = "Something went wrong";
/// Fallback when the transport fails without a message
pub const GENERIC_NETWORK_MESSAGE: &str = "Network error";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Rejected locally, the request was never sent
    #[error("{0}")]
    Validation(String),

    /// Server answered with a non-success status
    #[error("{0}")]
    Api(String),

    /// No response was obtained
    #[error("{0}")]
    Network(String),

    /// Success status but the body had an unexpected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Please log in to continue")]
    Unauthenticated,
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// Text shown in the status banner
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

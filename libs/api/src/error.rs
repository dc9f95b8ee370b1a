//! API error types

use thiserror::Error;

/// Errors from the profile request
///
/// All are terminal for the current run: they are logged, the loading
/// indicator clears, and no identity is shown. Trying again takes a full
/// restart and a fresh authorization.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request could not be completed (transport failure)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    /// The provider answered 2xx but the body was not a valid profile
    #[error("malformed profile response: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

impl ApiError {
    /// Create a provider error from a status code and its status text
    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: message.into(),
        }
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

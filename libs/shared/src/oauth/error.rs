//! OAuth error types

use thiserror::Error;

/// Errors that can occur during the implicit-grant flow
#[derive(Error, Debug)]
pub enum OAuthError {
    /// Client id missing from configuration
    #[error("missing client_id in configuration")]
    MissingClientId,

    /// Redirect URI missing from configuration
    #[error("missing redirect_uri in configuration")]
    MissingRedirectUri,

    /// Redirect URI could not be parsed into a bindable address
    #[error("invalid redirect_uri: {0}")]
    InvalidRedirectUri(String),

    /// The redirect-back request could not be understood
    #[error("malformed callback: {0}")]
    MalformedCallback(String),

    /// Anti-forgery state returned by the provider does not match ours
    #[error("callback state mismatch")]
    StateMismatch,

    /// The provider reported an authorization error (e.g. the user denied consent)
    #[error("authorization denied by provider: {0}")]
    AccessDenied(String),

    /// No redirect-back arrived before the deadline
    #[error("timed out waiting for the authorization callback")]
    CallbackTimeout,

    /// I/O error on the callback listener
    #[error("callback I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OAuthError {
    /// Create a malformed callback error
    pub fn malformed_callback(msg: impl Into<String>) -> Self {
        Self::MalformedCallback(msg.into())
    }

    /// Create an invalid redirect URI error
    pub fn invalid_redirect_uri(msg: impl Into<String>) -> Self {
        Self::InvalidRedirectUri(msg.into())
    }
}

/// Result type alias for OAuth operations
pub type OAuthResult<T> = Result<T, OAuthError>;

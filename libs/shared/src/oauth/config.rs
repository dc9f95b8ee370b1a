//! OAuth configuration types

use super::error::{OAuthError, OAuthResult};

/// Configuration for the implicit-grant authorization flow
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// OAuth client ID
    pub client_id: String,
    /// Base URL of the provider's accounts service (hosts `/authorize`)
    pub accounts_url: String,
    /// Redirect URI the provider sends the browser back to
    pub redirect_uri: String,
    /// Scopes to request
    pub scopes: Vec<String>,
}

impl AuthConfig {
    /// Create a new configuration with the default profile scopes
    pub fn new(
        client_id: impl Into<String>,
        accounts_url: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            accounts_url: accounts_url.into(),
            redirect_uri: redirect_uri.into(),
            scopes: Self::default_scopes(),
        }
    }

    /// Minimum scopes the profile card needs: basic profile + email
    pub fn default_scopes() -> Vec<String> {
        vec![
            "user-read-private".to_string(),
            "user-read-email".to_string(),
        ]
    }

    /// Get the scopes as a space-separated string
    pub fn scopes_string(&self) -> String {
        self.scopes.join(" ")
    }

    /// Check that the fields required to issue a redirect are present.
    ///
    /// Missing client id or redirect URI is a configuration error: the flow
    /// halts without redirecting and is not retried.
    pub fn validate(&self) -> OAuthResult<()> {
        if self.client_id.is_empty() {
            return Err(OAuthError::MissingClientId);
        }
        if self.redirect_uri.is_empty() {
            return Err(OAuthError::MissingRedirectUri);
        }
        Ok(())
    }
}

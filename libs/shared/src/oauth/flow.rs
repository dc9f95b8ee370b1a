//! OAuth implicit-grant redirect state machine

use super::callback::CallbackPayload;
use super::config::AuthConfig;
use super::error::{OAuthError, OAuthResult};
use super::state::StateToken;

/// Where the flow stands with respect to the authorization redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// No redirect has been issued
    Unauthenticated,
    /// A redirect was issued; waiting for the provider to send the browser back
    Redirecting,
}

/// The implicit-grant flow handler
///
/// Issuing the authorization redirect is exactly-once: once the flow enters
/// [`AuthPhase::Redirecting`], further calls to [`begin_authorization`] yield
/// no URL. This replaces the original widget's `redirected` boolean with an
/// explicit transition guard, so a re-run of the surrounding effect cannot
/// cause a redirect loop.
///
/// [`begin_authorization`]: ImplicitFlow::begin_authorization
pub struct ImplicitFlow {
    config: AuthConfig,
    phase: AuthPhase,
    state: Option<StateToken>,
}

impl ImplicitFlow {
    /// Create a new flow with the given configuration
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            phase: AuthPhase::Unauthenticated,
            state: None,
        }
    }

    /// Current phase of the flow
    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    /// Begin authorization: build the URL the browser must be sent to.
    ///
    /// Validates the configuration first; a missing client id or redirect URI
    /// is a hard stop (no redirect, not retried). Returns `Ok(None)` when a
    /// redirect has already been issued for this flow.
    pub fn begin_authorization(&mut self) -> OAuthResult<Option<String>> {
        if self.phase == AuthPhase::Redirecting {
            return Ok(None);
        }
        self.config.validate()?;

        let state = StateToken::generate();
        let url = format!(
            "{}/authorize?client_id={}&response_type=token&redirect_uri={}&scope={}&state={}",
            self.config.accounts_url,
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(&self.config.scopes_string()),
            state.as_str(),
        );

        self.state = Some(state);
        self.phase = AuthPhase::Redirecting;
        Ok(Some(url))
    }

    /// Accept the redirect-back payload and extract the access token.
    ///
    /// Verifies the anti-forgery state and surfaces provider-reported errors
    /// (e.g. the user denying consent).
    pub fn accept_callback(&self, payload: &CallbackPayload) -> OAuthResult<String> {
        if let Some(error) = &payload.error {
            return Err(OAuthError::AccessDenied(error.clone()));
        }

        let returned_state = payload
            .state
            .as_deref()
            .ok_or_else(|| OAuthError::malformed_callback("missing state parameter"))?;
        let expected = self
            .state
            .as_ref()
            .ok_or_else(|| OAuthError::malformed_callback("no authorization in progress"))?;
        if !expected.matches(returned_state) {
            return Err(OAuthError::StateMismatch);
        }

        payload
            .access_token
            .clone()
            .ok_or_else(|| OAuthError::malformed_callback("missing access_token parameter"))
    }
}

//! Per-run authentication session
//!
//! The session lives for one run of the dashboard and is never persisted:
//! the implicit-grant token is an ephemeral credential, and storing it
//! would change the security model.

/// Holds the access token obtained from the redirect-back.
///
/// The token is stored at most once per run, and handed out for exactly one
/// profile fetch. A duplicate invocation of the fetch effect therefore
/// claims nothing and cannot start a second, racing request.
#[derive(Debug, Default)]
pub struct AuthSession {
    access_token: Option<String>,
    fetch_claimed: bool,
}

impl AuthSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the extracted token. Only the first call takes effect;
    /// returns whether the token was stored.
    pub fn store_token(&mut self, token: String) -> bool {
        if self.access_token.is_some() {
            return false;
        }
        self.access_token = Some(token);
        true
    }

    /// The stored token, if any
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Claim the single profile fetch for the stored token.
    ///
    /// Returns the token on the first call after a token is stored, and
    /// `None` on every later call.
    pub fn claim_fetch(&mut self) -> Option<String> {
        if self.fetch_claimed {
            return None;
        }
        let token = self.access_token.clone()?;
        self.fetch_claimed = true;
        Some(token)
    }
}

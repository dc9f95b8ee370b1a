//! Anti-forgery `state` parameter
//!
//! The `state` value is sent with the authorization request and echoed back
//! by the provider on the redirect; a mismatch on return means the callback
//! was not a response to our request.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

/// A single-use anti-forgery token for the authorization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateToken {
    value: String,
}

impl StateToken {
    /// Generate a new random state token
    ///
    /// 32 random bytes, base64url without padding, so the value is safe to
    /// embed in a URL without further encoding.
    pub fn generate() -> Self {
        let random_bytes: [u8; 32] = rand::random();
        Self {
            value: URL_SAFE_NO_PAD.encode(random_bytes),
        }
    }

    /// The raw state value
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Compare against the state echoed back by the provider
    pub fn matches(&self, returned: &str) -> bool {
        self.value == returned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_length() {
        // base64url of 32 bytes without padding = 43 characters
        assert_eq!(StateToken::generate().as_str().len(), 43);
    }

    #[test]
    fn test_state_uniqueness() {
        let a = StateToken::generate();
        let b = StateToken::generate();
        assert_ne!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_state_url_safe() {
        let state = StateToken::generate();
        assert!(
            state
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_matches() {
        let state = StateToken::generate();
        let value = state.as_str().to_string();
        assert!(state.matches(&value));
        assert!(!state.matches("something-else"));
    }
}

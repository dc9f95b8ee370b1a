//! OAuth 2.0 implicit-grant authentication for the music profile widget
//!
//! The implicit grant returns the access token directly in the redirect URL
//! fragment; there is no server-side code exchange and no refresh. The token
//! lives for one page load and is used for exactly one profile fetch.
//!
//! # Architecture
//!
//! - `config`: provider configuration (client id, endpoints, scopes)
//! - `error`: error types for the authorization flow
//! - `flow`: the redirect state machine (`Unauthenticated -> Redirecting`)
//! - `state`: anti-forgery `state` parameter generation
//! - `callback`: redirect-back parsing and the loopback callback listener
//! - `session`: per-run credential holder with single-fetch semantics

pub mod callback;
pub mod config;
pub mod error;
pub mod flow;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use callback::{CallbackListener, CallbackPayload, parse_callback_url};
pub use config::AuthConfig;
pub use error::{OAuthError, OAuthResult};
pub use flow::{AuthPhase, ImplicitFlow};
pub use session::AuthSession;
pub use state::StateToken;

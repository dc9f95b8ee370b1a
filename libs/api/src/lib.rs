//! Spotify Web API client for the music profile widget
//!
//! One authenticated read: the current user's profile. The bearer token
//! comes from the implicit-grant flow and is used for a single request;
//! there is no refresh and no retry.

pub mod client;
pub mod error;
pub mod models;

pub use client::{Client, ClientConfig};
pub use error::{ApiError, ApiResult};
pub use models::ProviderIdentity;

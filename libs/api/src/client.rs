//! Bearer-authenticated profile client

use crate::error::{ApiError, ApiResult};
use crate::models::{CurrentUserResponse, ProviderIdentity};
use reqwest::{Client as ReqwestClient, header};

/// Client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the provider API, e.g. `https://api.spotify.com`
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.spotify.com".to_string(),
        }
    }
}

/// Profile API client
#[derive(Clone, Debug)]
pub struct Client {
    client: ReqwestClient,
    base_url: String,
}

impl Client {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!(
                "Homeboard/",
                env!("CARGO_PKG_VERSION")
            )),
        );

        let client = ReqwestClient::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the authenticated user's profile.
    ///
    /// One shot: a non-success status is a provider error carrying the
    /// status text, a transport failure is a network error, and a 2xx body
    /// that does not parse is a malformed-body error. No retries.
    pub async fn current_user(&self, access_token: &str) -> ApiResult<ProviderIdentity> {
        let url = format!("{}/v1/me", self.base_url);
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::provider(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status"),
            ));
        }

        let body = response.text().await?;
        let raw: CurrentUserResponse = serde_json::from_str(&body)?;
        Ok(raw.into())
    }
}

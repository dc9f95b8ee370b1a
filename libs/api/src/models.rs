//! Profile models
//!
//! The wire shape mirrors Spotify's `GET /v1/me` response. Parsing is
//! deliberately forgiving about absent fields (only `id` is required) but a
//! body that is not the expected JSON object fails the fetch instead of
//! crashing the widget.

use serde::Deserialize;

/// Wire shape of the provider's current-user endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentUserResponse {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub followers: Followers,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Image {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Followers {
    #[serde(default)]
    pub total: u64,
}

/// The authenticated user's profile, as shown on the card.
///
/// Constructed only from a successful response and replaced wholesale on
/// each fetch; never partially populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderIdentity {
    pub id: String,
    pub display_name: String,
    /// Avatar URLs, largest first; may be empty
    pub avatar_urls: Vec<String>,
    /// Outbound link to the public profile
    pub profile_url: Option<String>,
    pub follower_count: u64,
    pub email: Option<String>,
    pub country: Option<String>,
    pub biography: Option<String>,
}

impl From<CurrentUserResponse> for ProviderIdentity {
    fn from(raw: CurrentUserResponse) -> Self {
        let display_name = raw.display_name.unwrap_or_else(|| raw.id.clone());
        Self {
            display_name,
            avatar_urls: raw.images.into_iter().map(|image| image.url).collect(),
            profile_url: raw.external_urls.spotify,
            follower_count: raw.followers.total,
            email: raw.email,
            country: raw.country,
            biography: raw.biography,
            id: raw.id,
        }
    }
}

use config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const DEFAULT_API_URL: &str = "https://api.spotify.com";

/// On-disk shape of `~/.homeboard/config.toml`
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ConfigFile {
    pub client_id: Option<String>,
    pub redirect_uri: Option<String>,
    pub accounts_url: Option<String>,
    pub api_url: Option<String>,
}

/// Resolved application configuration
///
/// `client_id` and `redirect_uri` may resolve to empty strings: the
/// authorization flow is the component that reports the missing-configuration
/// error, not the loader.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub client_id: String,
    pub redirect_uri: String,
    pub accounts_url: String,
    pub api_url: String,
    /// Path the config was (or would have been) read from
    pub config_path: String,
}

fn get_config_path(custom_path: Option<&str>) -> String {
    custom_path.map(|p| p.to_string()).unwrap_or_else(|| {
        format!(
            "{}/.homeboard/config.toml",
            std::env::var("HOME").unwrap_or_default()
        )
    })
}

fn env_fallback(primary: &str, legacy: &str) -> Option<String> {
    // The original widget read SPOTIFY_* directly from the environment;
    // those names still work as fallbacks behind the HOMEBOARD_* ones.
    std::env::var(primary).ok().or_else(|| std::env::var(legacy).ok())
}

impl AppConfig {
    pub fn load(custom_config_path: Option<&str>) -> Result<Self, ConfigError> {
        let config_path = get_config_path(custom_config_path);

        let config_file = if Path::new(&config_path).exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::Message(format!("Failed to read config file: {}", e)))?;
            toml::from_str::<ConfigFile>(&content)
                .map_err(|e| ConfigError::Message(format!("Failed to parse config file: {}", e)))?
        } else {
            ConfigFile::default()
        };

        Ok(Self {
            client_id: env_fallback("HOMEBOARD_CLIENT_ID", "SPOTIFY_CLIENT_ID")
                .or(config_file.client_id)
                .unwrap_or_default(),
            redirect_uri: env_fallback("HOMEBOARD_REDIRECT_URI", "SPOTIFY_REDIRECT_URI")
                .or(config_file.redirect_uri)
                .unwrap_or_default(),
            accounts_url: config_file
                .accounts_url
                .unwrap_or_else(|| DEFAULT_ACCOUNTS_URL.to_string()),
            api_url: config_file
                .api_url
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            config_path,
        })
    }

    /// Directory for log files, next to the config file
    pub fn log_dir(&self) -> std::path::PathBuf {
        Path::new(&self.config_path)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(std::env::temp_dir)
            .join("logs")
    }
}

impl From<&AppConfig> for homeboard_shared::oauth::AuthConfig {
    fn from(config: &AppConfig) -> Self {
        homeboard_shared::oauth::AuthConfig::new(
            config.client_id.clone(),
            config.accounts_url.clone(),
            config.redirect_uri.clone(),
        )
    }
}

impl From<&AppConfig> for homeboard_api::ClientConfig {
    fn from(config: &AppConfig) -> Self {
        homeboard_api::ClientConfig {
            api_url: config.api_url.clone(),
        }
    }
}

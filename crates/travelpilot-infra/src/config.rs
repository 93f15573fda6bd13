//! Client configuration loader for TravelPilot.
//!
//! Reads `config.toml` from the data directory (`~/.travelpilot/` by default)
//! and deserializes it into [`ClientConfig`]. Falls back to defaults when the
//! file is missing or malformed, then applies environment overrides.

use std::path::Path;

use travelpilot_types::config::ClientConfig;

/// Environment variable that overrides `api_url`.
pub const API_URL_ENV: &str = "TRAVELPILOT_API_URL";

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - `TRAVELPILOT_API_URL`, when set and non-empty, replaces `api_url`.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    let config = read_config_file(data_dir).await;
    apply_overrides(config, std::env::var(API_URL_ENV).ok())
}

async fn read_config_file(data_dir: &Path) -> ClientConfig {
    let config_path = crate::filesystem::config_path(data_dir);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    }
}

/// Apply the API URL override and normalize the base URL.
///
/// Trailing slashes are trimmed so `{api_url}/chat` never doubles up.
pub fn apply_overrides(mut config: ClientConfig, api_url: Option<String>) -> ClientConfig {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        tracing::debug!(api_url = %url, "API URL overridden from environment");
        config.api_url = url.trim().to_string();
    }
    let trimmed = config.api_url.trim_end_matches('/').len();
    config.api_url.truncate(trimmed);
    config
}

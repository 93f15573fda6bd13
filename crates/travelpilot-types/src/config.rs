//! Client configuration types for TravelPilot.
//!
//! `ClientConfig` represents `config.toml` in the data directory. All fields
//! have defaults so an empty or missing file is valid.

use serde::{Deserialize, Serialize};

/// Endpoint used when neither the config file nor the environment names one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Storage slot holding the serialized trip list.
pub const DEFAULT_STORAGE_SLOT: &str = "travelpilot_sessions";

/// Top-level configuration for the TravelPilot client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the assistant service; requests go to `{api_url}/chat`.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Upper bound on a single assistant request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Name of the durable slot the trip list is stored under.
    #[serde(default = "default_storage_slot")]
    pub storage_slot: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_storage_slot() -> String {
    DEFAULT_STORAGE_SLOT.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            storage_slot: default_storage_slot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.storage_slot, "travelpilot_sessions");
    }

    #[test]
    fn test_client_config_deserialize_with_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_client_config_deserialize_with_values() {
        let toml_str = r#"
api_url = "https://travel-pilot.example.com"
request_timeout_secs = 30
"#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_url, "https://travel-pilot.example.com");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.storage_slot, "travelpilot_sessions");
    }
}

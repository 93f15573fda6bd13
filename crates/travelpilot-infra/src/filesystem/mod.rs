//! Data directory layout for TravelPilot.

use std::path::PathBuf;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "TRAVELPILOT_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `TRAVELPILOT_DATA_DIR` environment variable
/// 2. `~/.travelpilot`
/// 3. `.travelpilot` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".travelpilot");
    }

    PathBuf::from(".travelpilot")
}

/// Path of the config file inside a data directory.
pub fn config_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("config.toml")
}

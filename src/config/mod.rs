//! Application Configuration
//!
//! User settings and preferences stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Static data settings
    pub data: DataConfig,
    /// Game client settings
    pub client: ClientConfig,
}

/// How recommendations are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
    /// Output format for recommendations
    pub output: OutputFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            output: OutputFormat::Text,
        }
    }
}

/// Static data (Data Dragon) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// CDN base URL
    pub ddragon_base_url: String,
    /// Patch version used when the version list cannot be fetched
    pub fallback_version: String,
    /// Data locale
    pub locale: String,
    /// HTTP timeout in seconds
    pub request_timeout_secs: u64,
    /// Mirror fetched data to disk for offline use
    pub use_disk_cache: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            ddragon_base_url: "https://ddragon.leagueoflegends.com".to_string(),
            fallback_version: "15.1.1".to_string(),
            locale: "en_US".to_string(),
            request_timeout_secs: 10,
            use_disk_cache: true,
        }
    }
}

/// Local game client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Explicit path to the client lockfile
    pub lockfile_path: Option<PathBuf>,
    /// Champion select polling interval in milliseconds
    pub poll_interval_ms: u64,
    /// Push the rune page whenever the recommendation changes in watch mode
    pub auto_export_runes: bool,
    /// Also export an item set alongside the rune page
    pub export_item_set: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            lockfile_path: None,
            poll_interval_ms: 1000,
            auto_export_runes: false,
            export_item_set: true,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

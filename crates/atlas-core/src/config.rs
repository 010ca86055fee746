//! Configuration types.
//!
//! Configuration lives in `config.toml` under the platform config directory
//! (`~/.config/atlas/config.toml` on Linux). Every section is optional; a
//! missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// REST Countries endpoint restricted to the fields the browser shows.
pub const DEFAULT_SOURCE_URL: &str = "https://restcountries.com/v3.1/all?fields=name,capital,flags";

/// Runtime configuration loaded from config.toml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where countries are fetched from
    #[serde(default)]
    pub source: SourceConfig,

    /// Rendering settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Data source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Endpoint returning the full country list.
    pub url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Local JSON file to read instead of the endpoint.
    pub file: Option<PathBuf>,
}

impl SourceConfig {
    /// Request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: 10,
            file: None,
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the capital next to each country.
    pub show_capital: bool,

    /// Show the flag image URL next to each country.
    pub show_flag: bool,

    /// Maximum suggestions printed. Rendering only.
    pub max_suggestions: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_capital: true,
            show_flag: false,
            max_suggestions: 10,
        }
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("atlas"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Load configuration.
///
/// With an explicit path the file must exist. Without one, the default
/// location is tried and a missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (config_path().ok_or(ConfigError::NoConfigDir)?, false),
    };

    if !required && !path.exists() {
        tracing::info!("No config found at {} - using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let text = std::fs::read_to_string(&path)
        .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
    let config: AppConfig =
        toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;
    if config.source.timeout_secs == 0 {
        return Err(ConfigError::Parse(format!(
            "{}: source.timeout_secs must be at least 1",
            path.display()
        )));
    }

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

//! Dashboard settings.
//!
//! Settings are read from a JSON file (every field optional) and then
//! overridden from the environment. A missing file means defaults.

use crate::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_CONTINENT, DEFAULT_DATA_PATH, DEFAULT_LOG_FILTER,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an alternative settings file
pub const ENV_SETTINGS_PATH: &str = "COUNTRYBOARD_SETTINGS";
/// Environment variable overriding the dataset path
pub const ENV_DATA_PATH: &str = "COUNTRYBOARD_DATA";
/// Environment variable overriding the listen address
pub const ENV_BIND_ADDRESS: &str = "COUNTRYBOARD_ADDR";
/// Environment variable overriding the initial continent
pub const ENV_CONTINENT: &str = "COUNTRYBOARD_CONTINENT";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// CSV source of the dataset
    pub data_path: PathBuf,
    /// Address the HTTP server listens on
    pub bind_address: String,
    /// Continent selected when a session starts
    pub default_continent: String,
    /// tracing filter used when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            default_continent: DEFAULT_CONTINENT.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// the binary, a map in tests). Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(ENV_DATA_PATH) {
            self.data_path = PathBuf::from(path);
        }
        if let Some(addr) = get(ENV_BIND_ADDRESS) {
            self.bind_address = addr;
        }
        if let Some(continent) = get(ENV_CONTINENT) {
            self.default_continent = continent;
        }
        self
    }
}

/// Settings file location: `$COUNTRYBOARD_SETTINGS`, else the user config dir
pub fn settings_path() -> Option<PathBuf> {
    std::env::var_os(ENV_SETTINGS_PATH)
        .map(PathBuf::from)
        .or_else(default_settings_path)
}

/// `<config dir>/countryboard/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("countryboard").join("settings.json"))
}

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name used when neither the CLI, the environment nor settings name one.
pub const DEFAULT_STORE_FILE: &str = "integrations.yaml";

/// Errors that can occur when loading tool settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for the gatecfg tool itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub store: StoreSettings,
}

/// Where and how the integrations file is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Integrations file path (default: `integrations.yaml` in the working directory).
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Hold an advisory lock across load and save (default: true).
    #[serde(default = "default_lock")]
    pub lock: bool,
}

fn default_lock() -> bool {
    true
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: None,
            lock: default_lock(),
        }
    }
}

impl Settings {
    /// Returns the path to the settings file.
    ///
    /// Uses `~/.config/gatecfg/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn settings_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("gatecfg").join("config.toml")
    }

    /// Loads settings from the default settings file.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&Self::settings_path())
    }

    /// Loads settings from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SettingsError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| SettingsError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Resolves the integrations file: explicit override, then settings, then default.
    pub fn store_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.store.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
    }
}

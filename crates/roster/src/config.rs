//! Configuration management for roster.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "roster";

/// Default roster file name.
const DATA_FILE_NAME: &str = "students.db";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "ROSTER_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ROSTER_`, `__` between levels)
/// 2. TOML config file at `~/.config/roster/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the roster file.
    /// Defaults to `~/.local/share/roster/students.db`
    pub data_file: Option<PathBuf>,
}

/// Display-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Print the banner above the interactive menu.
    pub show_header: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { show_header: true }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// `config_path` replaces the default config file location. A missing
    /// config file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.storage.data_file {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "storage.data_file must not be empty".to_string(),
                });
            }
            if path.is_dir() {
                return Err(Error::ConfigValidation {
                    message: format!(
                        "storage.data_file points to a directory: {}",
                        path.display()
                    ),
                });
            }
        }

        Ok(())
    }

    /// Get the roster file path, resolving defaults if not set.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.storage
            .data_file
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATA_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.data_file.is_none());
        assert!(config.display.show_header);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_data_file() {
        let mut config = Config::default();
        config.storage.data_file = Some(PathBuf::new());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("data_file"));
    }

    #[test]
    fn test_validate_data_file_is_directory() {
        let mut config = Config::default();
        config.storage.data_file = Some(std::env::temp_dir());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("directory"));
    }

    #[test]
    fn test_data_file_default() {
        let config = Config::default();
        let path = config.data_file();

        assert!(path.to_string_lossy().contains("students.db"));
        assert!(path.to_string_lossy().contains("roster"));
    }

    #[test]
    fn test_data_file_custom() {
        let mut config = Config::default();
        config.storage.data_file = Some(PathBuf::from("/custom/path/class.db"));

        assert_eq!(config.data_file(), PathBuf::from("/custom/path/class.db"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("roster"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!("roster_config_{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[storage]\ndata_file = \"/srv/class/students.db\"\n\n[display]\nshow_header = false\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(
            config.storage.data_file,
            Some(PathBuf::from("/srv/class/students.db"))
        );
        assert!(!config.display.show_header);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let path = std::env::temp_dir().join(format!("roster_bad_{}.toml", std::process::id()));
        std::fs::write(&path, "[display]\nshow_header = \"sometimes\"\n").unwrap();

        let result = Config::load_from(Some(path.clone()));
        assert!(matches!(result, Err(Error::ConfigLoad(_))));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("data_file"));
        assert!(json.contains("show_header"));
    }

    #[test]
    fn test_display_config_deserialize_partial() {
        let display: DisplayConfig = serde_json::from_str("{}").unwrap();
        assert!(display.show_header);
    }
}

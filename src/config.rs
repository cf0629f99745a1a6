//! Configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main photoferry configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Watcher tuning
    pub watch: WatchConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .photoferry.yml
        let local_config = PathBuf::from(".photoferry.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/photoferry/photoferry.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("photoferry").join("photoferry.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when --log-level is not passed on the command line
    #[serde(rename = "log-level")]
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Watcher tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Recurse into subdirectories of the source root
    pub recursive: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { recursive: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.logging.log_level, "info");
        assert!(config.watch.recursive);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("photoferry.yml");
        std::fs::write(&path, "logging:\n  log-level: debug\nwatch:\n  recursive: false\n")
            .expect("write config");

        let config = Config::load(Some(&path)).expect("load config");
        assert_eq!(config.logging.log_level, "debug");
        assert!(!config.watch.recursive);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("photoferry.yml");
        std::fs::write(&path, "logging:\n  log-level: trace\n").expect("write config");

        let config = Config::load(Some(&path)).expect("load config");
        assert_eq!(config.logging.log_level, "trace");
        assert!(config.watch.recursive);
    }

    #[test]
    fn test_load_missing_explicit_file_errors() {
        let missing = PathBuf::from("/nonexistent/photoferry.yml");
        assert!(Config::load(Some(&missing)).is_err());
    }
}

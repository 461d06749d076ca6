//! Configuration management for Cratchit
//!
//! Supports environment variables, a config file, and defaults.
//! The environment file itself is not configurable: it always lives at
//! `<current dir>/cratchit.env`.
//!
//! Config file location: ~/.config/cratchit/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{CratchitError, Result};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV_VAR: &str = "CRATCHIT_LOG";

/// Main configuration for Cratchit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Diagnostics configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Interactive loop configuration
    #[serde(default)]
    pub repl: ReplConfig,
}

/// Diagnostics written to stderr
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    /// Default: warn
    pub filter: String,
    /// Colourise log output
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: env::var(LOG_ENV_VAR).unwrap_or_else(|_| "warn".to_string()),
            ansi: env::var("CRATCHIT_LOG_ANSI")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

/// Interactive loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplConfig {
    /// Print the `PATH=` line at startup
    pub show_search_path: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_search_path: env::var("CRATCHIT_SHOW_PATH")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cratchit")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: env vars > config file > defaults
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();

        let mut config = Self::load_from_file().unwrap_or_default();

        // An explicit filter in the environment beats the file
        if let Ok(filter) = env::var(LOG_ENV_VAR) {
            config.logging.filter = filter;
        }

        config
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(CratchitError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| CratchitError::config(format!("Failed to read config: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| CratchitError::config(format!("Failed to parse config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml("[repl]\nshow_search_path = false\n").unwrap();
        assert!(!config.repl.show_search_path);
        assert!(!config.logging.filter.is_empty());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("logging = 3").unwrap_err();
        assert!(matches!(err, CratchitError::Config(_)));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("filter"));
        assert!(toml_str.contains("show_search_path"));
    }

    #[test]
    fn test_config_dir() {
        let dir = Config::config_dir();
        assert!(dir.to_string_lossy().contains("cratchit"));
    }
}

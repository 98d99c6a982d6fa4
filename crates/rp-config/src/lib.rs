//! Rampart Configuration System
//!
//! This crate provides TOML-based configuration with environment variable override support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub mongodb: MongoConfig,
    pub logging: LoggingConfig,

    /// Seed sample data on startup
    pub dev_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            mongodb: MongoConfig::default(),
            logging: LoggingConfig::default(),
            dev_mode: false,
        }
    }
}

/// Which document store backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Mongodb,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
        }
    }
}

/// MongoDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017/?replicaSet=rs0&directConnection=true".to_string(),
            database: "rampart".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// "text" or "json"
    pub format: String,
    /// Fallback filter when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration with environment variable override
    pub fn load() -> Result<Self, ConfigError> {
        let loader = ConfigLoader::new();
        loader.load()
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.backend == StoreBackend::Mongodb {
            if self.mongodb.uri.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "mongodb.uri is required when store.backend = \"mongodb\"".to_string(),
                ));
            }
            if self.mongodb.database.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "mongodb.database is required when store.backend = \"mongodb\"".to_string(),
                ));
            }
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"text\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }

        Ok(())
    }

    /// Generate an example TOML configuration
    pub fn example_toml() -> String {
        r#"# Rampart Configuration
# Environment variables (RAMPART_*) override these settings

[store]
backend = "memory"  # memory or mongodb

[mongodb]
uri = "mongodb://localhost:27017/?replicaSet=rs0&directConnection=true"
database = "rampart"

[logging]
format = "text"  # text or json
level = "info"   # used when RUST_LOG is unset

dev_mode = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.mongodb.database, "rampart");
        assert_eq!(config.logging.level, "info");
        assert!(!config.dev_mode);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_example_toml_parses() {
        let config: AppConfig = toml::from_str(&AppConfig::example_toml()).unwrap();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[store]\nbackend = \"mongodb\"\n\n[mongodb]\ndatabase = \"iam\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store.backend, StoreBackend::Mongodb);
        assert_eq!(config.mongodb.database, "iam");
        assert!(config.mongodb.uri.starts_with("mongodb://"));
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn test_unknown_backend_is_a_parse_error() {
        let result: Result<AppConfig, _> = toml::from_str("[store]\nbackend = \"redis\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_empty_mongo_database() {
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Mongodb;
        config.mongodb.database = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        // Memory backend does not care
        config.store.backend = StoreBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = AppConfig::default();
        config.logging.format = "yaml".to_string();
        assert!(config.validate().is_err());
    }
}

//! Configuration loader with file and environment variable support

use crate::{AppConfig, ConfigError, StoreBackend};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "config.toml",
    "rampart.toml",
    "./config/config.toml",
    "/etc/rampart/config.toml",
];

/// Configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a loader with a specific config file path
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Load configuration from file (if found) with environment variable overrides
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::default();

        if let Some(path) = self.find_config_file() {
            info!(?path, "Loading configuration from file");
            config = AppConfig::from_file(&path)?;
        }

        apply_overrides(&mut config, |key| env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(&self) -> Option<PathBuf> {
        // Check explicit path first
        if let Some(path) = &self.config_path {
            if path.exists() {
                return Some(path.clone());
            }
            warn!(?path, "Configured path does not exist, searching defaults");
        }

        if let Ok(path) = env::var("RAMPART_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `RAMPART_*` overrides using `lookup` as the variable source
fn apply_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Store
    if let Some(val) = lookup("RAMPART_STORE_BACKEND") {
        match val.trim().to_ascii_lowercase().as_str() {
            "memory" => config.store.backend = StoreBackend::Memory,
            "mongodb" | "mongo" => config.store.backend = StoreBackend::Mongodb,
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "RAMPART_STORE_BACKEND must be 'memory' or 'mongodb', got '{}'",
                    other
                )))
            }
        }
    }

    // MongoDB
    if let Some(val) = lookup("RAMPART_MONGODB_URI") {
        config.mongodb.uri = val;
    }
    if let Some(val) = lookup("RAMPART_MONGODB_DATABASE") {
        config.mongodb.database = val;
    }

    // Logging
    if let Some(val) = lookup("RAMPART_LOG_FORMAT") {
        config.logging.format = val.trim().to_ascii_lowercase();
    }
    if let Some(val) = lookup("RAMPART_LOG_LEVEL") {
        config.logging.level = val;
    }

    // General
    if let Some(val) = lookup("RAMPART_DEV_MODE") {
        config.dev_mode = matches!(val.trim(), "true" | "1");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        apply_overrides(
            &mut config,
            lookup_from(&[
                ("RAMPART_STORE_BACKEND", "MongoDB"),
                ("RAMPART_MONGODB_URI", "mongodb://db:27017"),
                ("RAMPART_MONGODB_DATABASE", "iam"),
                ("RAMPART_LOG_FORMAT", "JSON"),
                ("RAMPART_DEV_MODE", "1"),
            ]),
        )
        .unwrap();

        assert_eq!(config.store.backend, StoreBackend::Mongodb);
        assert_eq!(config.mongodb.uri, "mongodb://db:27017");
        assert_eq!(config.mongodb.database, "iam");
        assert_eq!(config.logging.format, "json");
        assert!(config.dev_mode);
    }

    #[test]
    fn test_unknown_backend_override_is_rejected() {
        let mut config = AppConfig::default();
        let err = apply_overrides(&mut config, lookup_from(&[("RAMPART_STORE_BACKEND", "mogodb")])).unwrap_err();

        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("mogodb"));
        assert_eq!(config.store.backend, StoreBackend::Memory);
    }

    #[test]
    fn test_explicit_path_is_used() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dev_mode = true").unwrap();

        let loader = ConfigLoader::with_path(file.path());
        assert_eq!(loader.find_config_file(), Some(file.path().to_path_buf()));

        let config = AppConfig::from_file(file.path()).unwrap();
        assert!(config.dev_mode);
    }
}

//! Configuration loader with file and environment variable support

use crate::{AppConfig, ConfigError};
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "config.toml",
    "application.toml",
    "tenantkit.toml",
    "./config/config.toml",
    "./config/application.toml",
    "/etc/tenantkit/config.toml",
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
        // Start with defaults
        let mut config = AppConfig::default();

        // Try to load from file
        if let Some(path) = self.find_config_file() {
            info!(?path, "Loading configuration from file");
            config = AppConfig::from_file(&path)?;
        }

        // Apply environment variable overrides
        self.apply_env_overrides(&mut config);

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
        }

        // Check TENANTKIT_CONFIG env var
        if let Ok(path) = env::var("TENANTKIT_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // Search standard paths
        for path in CONFIG_PATHS {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&self, config: &mut AppConfig) {
        // HTTP
        if let Ok(val) = env::var("TENANTKIT_HTTP_PORT") {
            if let Ok(port) = val.parse() {
                config.http.port = port;
            }
        }
        if let Ok(val) = env::var("TENANTKIT_HTTP_HOST") {
            config.http.host = val;
        }
        if let Ok(val) = env::var("TENANTKIT_CORS_ORIGINS") {
            config.http.cors_origins = val.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Persistence
        if let Ok(val) = env::var("TENANTKIT_PERSISTENCE_BACKEND") {
            config.persistence.backend = val;
        }
        if let Ok(val) = env::var("TENANTKIT_PERSISTENCE_URL") {
            config.persistence.url = val;
        }
        if let Ok(val) = env::var("TENANTKIT_PERSISTENCE_DATA_DIR") {
            config.persistence.data_dir = val;
        }

        // Audit
        if let Ok(val) = env::var("TENANTKIT_AUDIT_ENABLED") {
            config.audit.enabled = val.parse().unwrap_or(true);
        }
        if let Ok(val) = env::var("TENANTKIT_AUDIT_RETENTION_DAYS") {
            if let Ok(days) = val.parse() {
                config.audit.retention_days = days;
            }
        }

        // General
        if let Ok(val) = env::var("TENANTKIT_DATA_DIR") {
            config.data_dir = val;
        }
        if let Ok(val) = env::var("TENANTKIT_DEV_MODE") {
            config.dev_mode = val.parse().unwrap_or(false);
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

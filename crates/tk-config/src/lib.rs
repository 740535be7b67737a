//! TenantKit Configuration System
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

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub persistence: PersistenceConfig,
    pub audit: AuditConfig,

    /// Data directory for local storage
    pub data_dir: String,

    /// Enable development mode
    pub dev_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            persistence: PersistenceConfig::default(),
            audit: AuditConfig::default(),
            data_dir: "./data".to_string(),
            dev_mode: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::ValidationError(
                "http.port must be non-zero".to_string(),
            ));
        }
        if !matches!(self.persistence.backend.as_str(), "memory" | "json" | "postgres") {
            return Err(ConfigError::ValidationError(format!(
                "unknown persistence backend '{}'",
                self.persistence.backend
            )));
        }
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            cors_origins: vec!["http://localhost:4200".to_string()],
        }
    }
}

/// Persistence adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Backend selector: "memory", "json", or "postgres"
    pub backend: String,

    /// Connection string for relational backends
    pub url: String,

    /// Directory for file-based backends
    pub data_dir: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            url: String::new(),
            data_dir: "./data/store".to_string(),
        }
    }
}

/// Audit sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Whether audit records are written on mutating operations
    pub enabled: bool,

    /// Retention window for audit records, in days (0 = keep forever)
    pub retention_days: u32,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            retention_days: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.persistence.backend, "memory");
        assert!(config.audit.enabled);
        assert!(!config.dev_mode);
    }

    #[test]
    fn test_from_toml_str() {
        let config = AppConfig::from_toml_str(
            r#"
            dev_mode = true

            [http]
            port = 9090

            [persistence]
            backend = "json"
            data_dir = "/var/lib/tenantkit"
            "#,
        )
        .unwrap();

        assert!(config.dev_mode);
        assert_eq!(config.http.port, 9090);
        assert_eq!(config.persistence.backend, "json");
        assert_eq!(config.persistence.data_dir, "/var/lib/tenantkit");
        // Unspecified sections fall back to defaults
        assert!(config.audit.enabled);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
            [persistence]
            backend = "cassandra"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_zero_port_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
            [http]
            port = 0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}

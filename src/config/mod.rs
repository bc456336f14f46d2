//! Configuration loading and management

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Service configuration.
///
/// Every field has a default, so an empty YAML document (or no file at all)
/// yields a runnable development setup: in-memory store, demo data, the
/// standard page size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind: String,

    /// PostgreSQL connection string; requires the `postgres` feature.
    /// Absent means the in-memory store.
    pub database_url: Option<String>,

    /// Rows per page on the invoices listing
    pub page_size: usize,

    /// Make the delete action fail unconditionally, for demonstrating the
    /// page-level error display
    pub simulate_delete_failure: bool,

    /// Seed the in-memory store with demo data at startup
    pub seed_demo_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            database_url: None,
            page_size: 6,
            simulate_delete_failure: false,
            seed_demo_data: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration for the binary.
    ///
    /// Reads the file named by `FACTURA_CONFIG` when set, otherwise starts
    /// from defaults; a `DATABASE_URL` environment variable overrides the
    /// file value either way.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("FACTURA_CONFIG") {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.is_empty() {
                config.database_url = Some(url);
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bind.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "bind".to_string(),
                message: "bind address must not be empty".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_size".to_string(),
                message: "page size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

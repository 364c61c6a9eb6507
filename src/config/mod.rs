//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file (path in `RENTAL_CONFIG`)
//! with a handful of environment overrides on top:
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 5050
//! storage:
//!   backend: mongodb
//!   mongodb_uri: mongodb://localhost:27017
//!   database: rental
//! booking:
//!   min_lead_days: 1
//!   max_span_days: 14
//!   return_policy: retain
//!   reject_overlaps: false
//! ```

use crate::core::error::ConfigError;
use crate::core::validation::BookingPolicy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the config file path
pub const CONFIG_PATH_ENV: &str = "RENTAL_CONFIG";

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub booking: BookingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5050,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which store backs the three collections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Mongodb,
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub mongodb_uri: Option<String>,
    pub database: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            mongodb_uri: None,
            database: "rental".to_string(),
        }
    }
}

/// What happens to the rental record when a car is taken back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnPolicy {
    /// Keep the record as history, stamped with `returnedAt`
    #[default]
    Retain,
    /// Remove the record
    Delete,
}

/// Booking rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub min_lead_days: i64,
    pub max_span_days: i64,
    pub return_policy: ReturnPolicy,
    /// Reject requests overlapping a pending request or active rental of the same car
    pub reject_overlaps: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        let policy = BookingPolicy::default();
        Self {
            min_lead_days: policy.min_lead_days,
            max_span_days: policy.max_span_days,
            return_policy: ReturnPolicy::default(),
            reject_overlaps: false,
        }
    }
}

impl BookingConfig {
    pub fn policy(&self) -> BookingPolicy {
        BookingPolicy {
            min_lead_days: self.min_lead_days,
            max_span_days: self.max_span_days,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from `RENTAL_CONFIG` (or defaults), apply environment overrides and validate
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_yaml_file(path)?,
            Err(_) => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PORT`, `MONGODB_URI` and `MONGODB_DATABASE` overrides
    ///
    /// A `MONGODB_URI` switches the backend to MongoDB.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                field: "PORT".to_string(),
                value: port.clone(),
                message: "expected a port number".to_string(),
            })?;
        }

        if let Some(uri) = lookup("MONGODB_URI") {
            self.storage.backend = StorageBackend::Mongodb;
            self.storage.mongodb_uri = Some(uri);
        }

        if let Some(database) = lookup("MONGODB_DATABASE") {
            self.storage.database = database;
        }

        Ok(())
    }

    /// Check values that serde alone cannot rule out
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.booking.min_lead_days < 0 {
            return Err(ConfigError::InvalidValue {
                field: "booking.min_lead_days".to_string(),
                value: self.booking.min_lead_days.to_string(),
                message: "must not be negative".to_string(),
            });
        }

        if self.booking.max_span_days < 1 {
            return Err(ConfigError::InvalidValue {
                field: "booking.max_span_days".to_string(),
                value: self.booking.max_span_days.to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if self.storage.backend == StorageBackend::Mongodb
            && self.storage.mongodb_uri.as_deref().is_none_or(str::is_empty)
        {
            return Err(ConfigError::InvalidValue {
                field: "storage.mongodb_uri".to_string(),
                value: String::new(),
                message: "required when storage.backend is mongodb".to_string(),
            });
        }

        Ok(())
    }
}

//! Configuration module
//!
//! Environment-driven configuration for the opsdeck core. Variables are
//! read with the `OPSDECK_` prefix (e.g. `OPSDECK_STORAGE_BACKEND=jsonfile`);
//! a local `.env` file is honored when present.

use crate::error::AppError;
use crate::storage_types::StorageKind;
use serde::Deserialize;

fn default_storage_backend() -> StorageKind {
    StorageKind::Memory
}

fn default_data_file_path() -> String {
    "opsdeck-data.json".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_filter() -> String {
    "opsdeck=debug".to_string()
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_storage_backend")]
    pub storage_backend: StorageKind,
    /// Path of the JSON document used by the `jsonfile` backend.
    #[serde(default = "default_data_file_path")]
    pub data_file_path: String,
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Default directive for the tracing `EnvFilter` when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Config {
    /// Load configuration from the environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        envy::prefixed("OPSDECK_")
            .from_env()
            .map_err(|e| AppError::Config(e.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_backend: default_storage_backend(),
            data_file_path: default_data_file_path(),
            environment: default_environment(),
            log_filter: default_log_filter(),
        }
    }
}

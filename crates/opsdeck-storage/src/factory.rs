//! Storage backend factory.

use crate::jsonfile::JsonFileStorage;
use crate::memory::MemoryStorage;
use crate::traits::{Storage, StorageResult};
use opsdeck_core::{Config, StorageKind};
use std::sync::Arc;

/// Build the storage backend selected by configuration.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        StorageKind::Memory => {
            tracing::info!("Using in-memory storage backend");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageKind::JsonFile => {
            tracing::info!(path = %config.data_file_path, "Using JSON file storage backend");
            let storage = JsonFileStorage::new(config.data_file_path.clone()).await?;
            Ok(Arc::new(storage))
        }
    }
}

//! Storage abstraction trait
//!
//! This module defines the Storage trait that all persistence backends must
//! implement, the error taxonomy for storage operations, and the typed
//! snapshot returned by the bulk load.

use async_trait::async_trait;
use opsdeck_core::models::{
    Client, Company, Lead, Partner, Project, SaasProduct, Transaction, User,
};
use opsdeck_core::{AppError, Collection};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Record not found: {0}")]
    NotFound(Uuid),

    #[error("Save failed: {0}")]
    SaveFailed(String),

    #[error("Update failed: {0}")]
    UpdateFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Persistence(err.to_string())
    }
}

/// Full, un-scoped contents of every collection, as loaded once per session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub companies: Vec<Company>,
    pub clients: Vec<Client>,
    pub partners: Vec<Partner>,
    pub projects: Vec<Project>,
    pub saas_products: Vec<SaasProduct>,
    pub leads: Vec<Lead>,
    pub transactions: Vec<Transaction>,
}

/// Extract the `id` field of a record in its boundary (JSON) form.
pub(crate) fn record_id(record: &Value) -> StorageResult<Uuid> {
    record
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| StorageError::SaveFailed("record has no valid id field".to_string()))
}

/// Storage abstraction trait
///
/// Backends make no tenancy decisions: scoping and entitlement happen
/// entirely above this boundary. Failure contract: a failed `save` /
/// `update` / `delete` must leave the backend's previous state intact so
/// the caller can retry.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Bulk-load every collection. Called once per authenticated session.
    async fn fetch_all(&self) -> StorageResult<Snapshot>;

    /// Persist a new record into the named collection.
    async fn save(&self, collection: Collection, record: Value) -> StorageResult<()>;

    /// Persist the full replacement for an existing record (matched by id).
    async fn update(&self, collection: Collection, record: Value) -> StorageResult<()>;

    /// Remove a record by id. Backends may report an absent id as
    /// `NotFound`; callers are expected to treat that as success.
    async fn delete(&self, collection: Collection, id: Uuid) -> StorageResult<()>;
}

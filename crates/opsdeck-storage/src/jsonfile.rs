//! JSON-file storage backend.
//!
//! Persists every collection inside a single JSON document on local disk.
//! Writes go through a temp file in the same directory followed by an
//! atomic rename, so a crash mid-write can never leave a half-written
//! document behind. A mutex serializes read-modify-write cycles.

use crate::traits::{record_id, Snapshot, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use opsdeck_core::Collection;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

type Document = HashMap<String, Vec<Value>>;

/// Single-document JSON persistence.
pub struct JsonFileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    /// Open (or initialize) the document at `path`.
    pub async fn new(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    StorageError::ConfigError(format!(
                        "Failed to create data directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        let storage = JsonFileStorage {
            path,
            write_lock: Mutex::new(()),
        };
        if !storage.path.exists() {
            storage.write_document(Document::default()).await?;
        }
        Ok(storage)
    }

    async fn read_document(&self) -> StorageResult<Document> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::default()),
            Err(e) => return Err(StorageError::FetchFailed(e.to_string())),
        };
        if bytes.is_empty() {
            return Ok(Document::default());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write_document(&self, doc: Document) -> StorageResult<()> {
        let path = self.path.clone();
        let bytes = serde_json::to_vec_pretty(&doc)?;
        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
            .await
            .map_err(|e| StorageError::SaveFailed(format!("write task panicked: {e}")))?
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> StorageResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path)
        .map_err(|e| StorageError::SaveFailed(format!("atomic rename failed: {e}")))?;
    Ok(())
}

fn collection_values(snapshot_key: &str, doc: &Document) -> Value {
    Value::Array(doc.get(snapshot_key).cloned().unwrap_or_default())
}

#[async_trait]
impl Storage for JsonFileStorage {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_all(&self) -> StorageResult<Snapshot> {
        let doc = self.read_document().await?;
        Ok(Snapshot {
            users: serde_json::from_value(collection_values("users", &doc))?,
            companies: serde_json::from_value(collection_values("companies", &doc))?,
            clients: serde_json::from_value(collection_values("clients", &doc))?,
            partners: serde_json::from_value(collection_values("partners", &doc))?,
            projects: serde_json::from_value(collection_values("projects", &doc))?,
            saas_products: serde_json::from_value(collection_values("saas_products", &doc))?,
            leads: serde_json::from_value(collection_values("leads", &doc))?,
            transactions: serde_json::from_value(collection_values("transactions", &doc))?,
        })
    }

    #[tracing::instrument(skip(self, record), fields(collection = %collection))]
    async fn save(&self, collection: Collection, record: Value) -> StorageResult<()> {
        record_id(&record)?;
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document().await?;
        doc.entry(collection.as_str().to_string())
            .or_default()
            .push(record);
        self.write_document(doc).await
    }

    #[tracing::instrument(skip(self, record), fields(collection = %collection))]
    async fn update(&self, collection: Collection, record: Value) -> StorageResult<()> {
        let id = record_id(&record)?;
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document().await?;
        let slot = doc.entry(collection.as_str().to_string()).or_default();
        match slot
            .iter_mut()
            .find(|r| record_id(r).map(|rid| rid == id).unwrap_or(false))
        {
            Some(existing) => *existing = record,
            None => slot.push(record),
        }
        self.write_document(doc).await
    }

    #[tracing::instrument(skip(self), fields(collection = %collection, record = %id))]
    async fn delete(&self, collection: Collection, id: Uuid) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document().await?;
        let slot = doc.entry(collection.as_str().to_string()).or_default();
        let before = slot.len();
        slot.retain(|r| record_id(r).map(|rid| rid != id).unwrap_or(true));
        if slot.len() == before {
            return Err(StorageError::NotFound(id));
        }
        self.write_document(doc).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client_record(id: Uuid) -> Value {
        json!({
            "id": id,
            "company_id": Uuid::new_v4(),
            "name": "Test Client",
            "email": null,
            "phone": null,
            "address": null,
            "created_at": "2026-02-01T09:30:00Z",
        })
    }

    #[tokio::test]
    async fn document_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let id = Uuid::new_v4();
        {
            let storage = JsonFileStorage::new(&path).await.unwrap();
            storage
                .save(Collection::Clients, client_record(id))
                .await
                .unwrap();
        }
        let reopened = JsonFileStorage::new(&path).await.unwrap();
        let snapshot = reopened.fetch_all().await.unwrap();
        assert_eq!(snapshot.clients.len(), 1);
        assert_eq!(snapshot.clients[0].id, id);
    }

    #[tokio::test]
    async fn update_replaces_matching_record() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("data.json"))
            .await
            .unwrap();
        let id = Uuid::new_v4();
        storage
            .save(Collection::Clients, client_record(id))
            .await
            .unwrap();
        let mut updated = client_record(id);
        updated["name"] = json!("Renamed Client");
        storage.update(Collection::Clients, updated).await.unwrap();
        let snapshot = storage.fetch_all().await.unwrap();
        assert_eq!(snapshot.clients.len(), 1);
        assert_eq!(snapshot.clients[0].name, "Renamed Client");
    }

    #[tokio::test]
    async fn delete_absent_id_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("data.json"))
            .await
            .unwrap();
        let err = storage
            .delete(Collection::Projects, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_file_reads_as_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        tokio::fs::write(&path, b"").await.unwrap();
        let storage = JsonFileStorage::new(&path).await.unwrap();
        let snapshot = storage.fetch_all().await.unwrap();
        assert!(snapshot.users.is_empty());
        assert!(snapshot.companies.is_empty());
    }
}

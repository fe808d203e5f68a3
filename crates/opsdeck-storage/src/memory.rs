//! In-memory storage backend.
//!
//! Used by tests and development sessions. Data lives for the process
//! lifetime only. The `fail_writes` toggle makes every write operation fail
//! with a transport-style error, which is how the rollback-on-failure
//! behavior of the mutation coordinator gets exercised in tests.

use crate::traits::{record_id, Snapshot, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use opsdeck_core::Collection;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

/// HashMap-backed storage backend.
pub struct MemoryStorage {
    data: Mutex<HashMap<Collection, Vec<Value>>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        let mut data = HashMap::new();
        for collection in Collection::ALL {
            data.insert(collection, Vec::new());
        }
        MemoryStorage {
            data: Mutex::new(data),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Create a backend pre-populated from a snapshot.
    pub fn seeded(snapshot: &Snapshot) -> StorageResult<Self> {
        let mut data = HashMap::new();
        data.insert(Collection::Users, to_values(&snapshot.users)?);
        data.insert(Collection::Companies, to_values(&snapshot.companies)?);
        data.insert(Collection::Clients, to_values(&snapshot.clients)?);
        data.insert(Collection::Partners, to_values(&snapshot.partners)?);
        data.insert(Collection::Projects, to_values(&snapshot.projects)?);
        data.insert(Collection::SaasProducts, to_values(&snapshot.saas_products)?);
        data.insert(Collection::Leads, to_values(&snapshot.leads)?);
        data.insert(Collection::Transactions, to_values(&snapshot.transactions)?);
        Ok(MemoryStorage {
            data: Mutex::new(data),
            fail_writes: AtomicBool::new(false),
        })
    }

    /// Make every subsequent write fail (or succeed again) with a
    /// transport-style error. Reads are unaffected.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self, op: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(match op {
                "save" => StorageError::SaveFailed("simulated transport failure".to_string()),
                "update" => StorageError::UpdateFailed("simulated transport failure".to_string()),
                _ => StorageError::DeleteFailed("simulated transport failure".to_string()),
            });
        }
        Ok(())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn to_values<T: serde::Serialize>(records: &[T]) -> StorageResult<Vec<Value>> {
    records
        .iter()
        .map(|r| serde_json::to_value(r).map_err(StorageError::from))
        .collect()
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn fetch_all(&self) -> StorageResult<Snapshot> {
        let data = self.data.lock().await;
        let get = |c: Collection| -> StorageResult<Value> {
            Ok(Value::Array(data.get(&c).cloned().unwrap_or_default()))
        };
        Ok(Snapshot {
            users: serde_json::from_value(get(Collection::Users)?)?,
            companies: serde_json::from_value(get(Collection::Companies)?)?,
            clients: serde_json::from_value(get(Collection::Clients)?)?,
            partners: serde_json::from_value(get(Collection::Partners)?)?,
            projects: serde_json::from_value(get(Collection::Projects)?)?,
            saas_products: serde_json::from_value(get(Collection::SaasProducts)?)?,
            leads: serde_json::from_value(get(Collection::Leads)?)?,
            transactions: serde_json::from_value(get(Collection::Transactions)?)?,
        })
    }

    async fn save(&self, collection: Collection, record: Value) -> StorageResult<()> {
        self.check_writable("save")?;
        record_id(&record)?;
        let mut data = self.data.lock().await;
        data.entry(collection).or_default().push(record);
        Ok(())
    }

    async fn update(&self, collection: Collection, record: Value) -> StorageResult<()> {
        self.check_writable("update")?;
        let id = record_id(&record)?;
        let mut data = self.data.lock().await;
        let slot = data.entry(collection).or_default();
        match slot
            .iter_mut()
            .find(|r| record_id(r).map(|rid| rid == id).unwrap_or(false))
        {
            Some(existing) => *existing = record,
            // Upsert: an update for an id the backend has never seen is
            // stored rather than rejected.
            None => slot.push(record),
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> StorageResult<()> {
        self.check_writable("delete")?;
        let mut data = self.data.lock().await;
        let slot = data.entry(collection).or_default();
        let before = slot.len();
        slot.retain(|r| record_id(r).map(|rid| rid != id).unwrap_or(true));
        if slot.len() == before {
            // Reported so callers exercising the "absent id" path see the
            // documented backend behavior; the coordinator maps it to success.
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }
}

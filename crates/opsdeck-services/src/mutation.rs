//! Mutation coordinator.
//!
//! Every create/update/delete flows through here. The coordinator assigns
//! tenant ownership at create time, persists through the storage
//! collaborator first, and only commits to the in-memory store when the
//! persist step succeeded - a failed persist leaves the store exactly as it
//! was, so a user retry is always safe.
//!
//! No operation retries automatically: a re-submitted create would mint a
//! second record under a fresh id, so retry policy stays with the caller.

use crate::store::{EntityStore, StoreCollection};
use chrono::Utc;
use opsdeck_core::models::Company;
use opsdeck_core::{AppError, Collection, IdentityContext};
use opsdeck_storage::{Snapshot, Storage, StorageError};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Coordinates persistence and store reconciliation for all mutations.
pub struct MutationCoordinator {
    store: Arc<RwLock<EntityStore>>,
    storage: Arc<dyn Storage>,
}

impl MutationCoordinator {
    pub fn new(store: Arc<RwLock<EntityStore>>, storage: Arc<dyn Storage>) -> Self {
        MutationCoordinator { store, storage }
    }

    /// Bulk-load the session's entity store from the storage collaborator.
    pub async fn bootstrap(storage: Arc<dyn Storage>) -> Result<Self, AppError> {
        let snapshot: Snapshot = storage.fetch_all().await?;
        tracing::info!(
            users = snapshot.users.len(),
            companies = snapshot.companies.len(),
            "entity store loaded"
        );
        Ok(MutationCoordinator {
            store: Arc::new(RwLock::new(EntityStore::from_snapshot(snapshot))),
            storage,
        })
    }

    /// Shared handle to the entity store for read-only consumers.
    pub fn store(&self) -> Arc<RwLock<EntityStore>> {
        Arc::clone(&self.store)
    }

    /// Create a record under the active company.
    ///
    /// The draft carries only caller-supplied fields; the id, owning
    /// company, and per-entity defaults are assigned here. Entitlement is
    /// not checked - callers run the plan gate before calling this.
    #[tracing::instrument(skip(self, draft, ctx), fields(collection = %E::COLLECTION))]
    pub async fn create<E: StoreCollection>(
        &self,
        draft: E::Draft,
        ctx: &IdentityContext,
    ) -> Result<E, AppError> {
        let resolved = ctx.resolve();
        let company_id = resolved.active_company_id.ok_or(AppError::NoActiveTenant)?;

        let record = E::from_draft(draft, Uuid::new_v4(), company_id, Utc::now());
        self.storage
            .save(E::COLLECTION, serde_json::to_value(&record)?)
            .await?;

        let mut store = self.store.write().await;
        E::slot_mut(&mut store).push(record.clone());
        tracing::debug!(record = %record.id(), company = %company_id, "record created");
        Ok(record)
    }

    /// Persist a full replacement for an existing record.
    ///
    /// The owning company is immutable: a submitted record whose
    /// `company_id` differs from the stored one is rejected before any
    /// storage call. Non-superadmins may only update records of their
    /// active company.
    #[tracing::instrument(skip(self, record, ctx), fields(collection = %E::COLLECTION, record = %record.id()))]
    pub async fn update<E: StoreCollection>(
        &self,
        record: E,
        ctx: &IdentityContext,
    ) -> Result<E, AppError> {
        let resolved = ctx.resolve();
        {
            let store = self.store.read().await;
            if let Some(existing) = E::slot(&store).iter().find(|r| r.id() == record.id()) {
                if existing.company_id() != record.company_id() {
                    return Err(AppError::TenantReassignmentForbidden);
                }
            }
            if !resolved.is_super_admin && record.company_id() != resolved.active_company_id {
                return Err(AppError::CrossTenantDenied);
            }
        }

        self.storage
            .update(E::COLLECTION, serde_json::to_value(&record)?)
            .await?;

        let mut store = self.store.write().await;
        let slot = E::slot_mut(&mut store);
        match slot.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record.clone(),
            // Persisted but not yet in the store: reconcile by appending.
            None => slot.push(record.clone()),
        }
        Ok(record)
    }

    /// Remove a record by id. Deleting a nonexistent id is a no-op, even
    /// when the storage collaborator reports it as missing.
    #[tracing::instrument(skip(self, ctx), fields(collection = %E::COLLECTION, record = %id))]
    pub async fn delete<E: StoreCollection>(
        &self,
        id: Uuid,
        ctx: &IdentityContext,
    ) -> Result<(), AppError> {
        let resolved = ctx.resolve();
        {
            let store = self.store.read().await;
            if let Some(existing) = E::slot(&store).iter().find(|r| r.id() == id) {
                if !resolved.is_super_admin && existing.company_id() != resolved.active_company_id {
                    return Err(AppError::CrossTenantDenied);
                }
            }
        }

        match self.storage.delete(E::COLLECTION, id).await {
            Ok(()) => {}
            Err(StorageError::NotFound(_)) => {
                tracing::debug!("delete of absent record treated as success");
            }
            Err(e) => return Err(e.into()),
        }

        let mut store = self.store.write().await;
        E::slot_mut(&mut store).retain(|r| r.id() != id);
        Ok(())
    }

    /// Persist a full replacement of a company record.
    ///
    /// Companies sit outside the generic tenant-scoped path (they have no
    /// owning tenant); the guard here is identity-based instead.
    #[tracing::instrument(skip(self, company, ctx), fields(company = %company.id))]
    pub async fn update_company(
        &self,
        company: Company,
        ctx: &IdentityContext,
    ) -> Result<Company, AppError> {
        let resolved = ctx.resolve();
        if !resolved.is_super_admin && resolved.active_company_id != Some(company.id) {
            return Err(AppError::CrossTenantDenied);
        }

        self.storage
            .update(Collection::Companies, serde_json::to_value(&company)?)
            .await?;

        let mut store = self.store.write().await;
        store.replace_company(company.clone());
        Ok(company)
    }
}

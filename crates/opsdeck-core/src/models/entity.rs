//! Shared shape of storable entities.
//!
//! Every record the platform stores belongs to exactly one collection and,
//! with the exception of companies themselves, carries the id of the company
//! that owns it. The two traits here give the scoping filter and the
//! mutation coordinator a single generic surface over the closed set of
//! entity kinds instead of per-entity copies of the same logic.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Collection tag for every storable entity kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Users,
    Companies,
    Clients,
    Partners,
    Projects,
    SaasProducts,
    Leads,
    Transactions,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Users,
        Collection::Companies,
        Collection::Clients,
        Collection::Partners,
        Collection::Projects,
        Collection::SaasProducts,
        Collection::Leads,
        Collection::Transactions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Companies => "companies",
            Collection::Clients => "clients",
            Collection::Partners => "partners",
            Collection::Projects => "projects",
            Collection::SaasProducts => "saas_products",
            Collection::Leads => "leads",
            Collection::Transactions => "transactions",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base shape shared by tenant-scoped records.
///
/// A record whose `company_id` is `None` (or points at a company that no
/// longer exists) is invisible to every tenant; it is never an error.
pub trait TenantScoped {
    fn company_id(&self) -> Option<Uuid>;
}

/// A storable, tenant-owned entity kind.
///
/// `from_draft` is the single place where create-time defaults are applied
/// (a new project starts `Pending` at 0% progress, a new partner is
/// available, a new lead gets its `created_at` and an empty message log).
/// Callers never assemble a full record themselves, so the id and owning
/// company assigned by the coordinator cannot be forged or forgotten.
pub trait Entity:
    TenantScoped + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const COLLECTION: Collection;

    /// Caller-supplied fields for a create operation.
    type Draft: Send;

    fn id(&self) -> Uuid;

    /// Build a full record from a draft, a fresh id, and the active company.
    fn from_draft(draft: Self::Draft, id: Uuid, company_id: Uuid, now: DateTime<Utc>) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_round_trips_through_serde() {
        let json = serde_json::to_string(&Collection::SaasProducts).unwrap();
        assert_eq!(json, "\"saas_products\"");
        let back: Collection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Collection::SaasProducts);
    }

    #[test]
    fn collection_all_covers_every_kind() {
        assert_eq!(Collection::ALL.len(), 8);
    }
}

use super::entity::{Collection, Entity, TenantScoped};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// CRM client entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TenantScoped for Client {
    fn company_id(&self) -> Option<Uuid> {
        Some(self.company_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewClient {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Entity for Client {
    const COLLECTION: Collection = Collection::Clients;
    type Draft = NewClient;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(draft: NewClient, id: Uuid, company_id: Uuid, now: DateTime<Utc>) -> Self {
        Client {
            id,
            company_id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            created_at: now,
        }
    }
}

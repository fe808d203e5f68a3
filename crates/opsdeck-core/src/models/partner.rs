use super::entity::{Collection, Entity, TenantScoped};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Field partner (installer / contractor) entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partner {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub specialty: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl TenantScoped for Partner {
    fn company_id(&self) -> Option<Uuid> {
        Some(self.company_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewPartner {
    pub name: String,
    pub specialty: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Entity for Partner {
    const COLLECTION: Collection = Collection::Partners;
    type Draft = NewPartner;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(draft: NewPartner, id: Uuid, company_id: Uuid, now: DateTime<Utc>) -> Self {
        Partner {
            id,
            company_id,
            name: draft.name,
            specialty: draft.specialty,
            email: draft.email,
            phone: draft.phone,
            // New partners start available until marked otherwise.
            is_available: true,
            created_at: now,
        }
    }
}

use super::entity::{Collection, Entity, TenantScoped};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lead pipeline status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Lost,
    Won,
}

/// Direction of a logged lead message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageDirection {
    Outbound,
    Inbound,
}

/// One message in a lead's conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadMessage {
    pub date: DateTime<Utc>,
    pub direction: MessageDirection,
    pub body: String,
}

/// Sales lead entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Where the lead came from (manual entry, scraper, referral...).
    pub source: Option<String>,
    pub status: LeadStatus,
    pub messages: Vec<LeadMessage>,
    pub created_at: DateTime<Utc>,
}

impl TenantScoped for Lead {
    fn company_id(&self) -> Option<Uuid> {
        Some(self.company_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewLead {
    pub name: String,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
}

impl Entity for Lead {
    const COLLECTION: Collection = Collection::Leads;
    type Draft = NewLead;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(draft: NewLead, id: Uuid, company_id: Uuid, now: DateTime<Utc>) -> Self {
        Lead {
            id,
            company_id,
            name: draft.name,
            company_name: draft.company_name,
            email: draft.email,
            phone: draft.phone,
            source: draft.source,
            status: LeadStatus::New,
            messages: Vec::new(),
            created_at: now,
        }
    }
}

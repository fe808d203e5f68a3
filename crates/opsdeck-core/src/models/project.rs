use super::entity::{Collection, Entity, TenantScoped};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Project status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// One entry in a project's activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub date: DateTime<Utc>,
    pub author: String,
    pub note: String,
}

/// Project (site/job) entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub client_id: Option<Uuid>,
    pub status: ProjectStatus,
    /// Completion percentage, 0..=100.
    pub progress: u8,
    pub budget: Option<Decimal>,
    pub activity_log: Vec<ActivityEntry>,
    pub created_at: DateTime<Utc>,
}

impl TenantScoped for Project {
    fn company_id(&self) -> Option<Uuid> {
        Some(self.company_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: String,
    pub client_id: Option<Uuid>,
    pub budget: Option<Decimal>,
}

impl Entity for Project {
    const COLLECTION: Collection = Collection::Projects;
    type Draft = NewProject;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(draft: NewProject, id: Uuid, company_id: Uuid, now: DateTime<Utc>) -> Self {
        Project {
            id,
            company_id,
            name: draft.name,
            client_id: draft.client_id,
            status: ProjectStatus::Pending,
            progress: 0,
            budget: draft.budget,
            activity_log: Vec::new(),
            created_at: now,
        }
    }
}

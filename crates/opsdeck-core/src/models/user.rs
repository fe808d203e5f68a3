use super::entity::{Collection, Entity, TenantScoped};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// User role for authorization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Platform operator: global visibility, may impersonate a company.
    SuperAdmin,
    Admin,
    Member,
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UserRole::SuperAdmin => write!(f, "superadmin"),
            UserRole::Admin => write!(f, "admin"),
            UserRole::Member => write!(f, "member"),
        }
    }
}

/// Authenticated user (actor) entity.
///
/// `company_id` is `None` only for platform-level superadmins; every other
/// user belongs to exactly one company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub role: UserRole,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_super_admin(&self) -> bool {
        self.role == UserRole::SuperAdmin
    }
}

impl TenantScoped for User {
    fn company_id(&self) -> Option<Uuid> {
        self.company_id
    }
}

/// Caller-supplied fields when adding a member to the active company.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub phone: Option<String>,
}

impl Entity for User {
    const COLLECTION: Collection = Collection::Users;
    type Draft = NewMember;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(draft: NewMember, id: Uuid, company_id: Uuid, now: DateTime<Utc>) -> Self {
        User {
            id,
            company_id: Some(company_id),
            role: draft.role,
            name: draft.name,
            email: draft.email,
            password_hash: draft.password_hash,
            phone: draft.phone,
            created_at: now,
        }
    }
}

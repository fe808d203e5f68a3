//! Identity and impersonation context.
//!
//! Every scoping and entitlement call takes an explicit `IdentityContext`
//! value; there is no ambient "current user" state. This keeps the policy
//! functions pure and testable without environment setup.

use crate::models::{User, UserRole};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated actor plus an optional impersonation override.
///
/// Precondition: only a `SuperAdmin` actor may carry a non-`None`
/// `impersonated_company_id`. `impersonate` enforces this at the point the
/// override is set; `resolve` itself does not re-check it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityContext {
    pub actor: User,
    pub impersonated_company_id: Option<Uuid>,
}

/// Outcome of resolving an identity context for scoping purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedIdentity {
    /// Company whose data the actor currently sees; `None` for a
    /// superadmin with no company and no impersonation active.
    pub active_company_id: Option<Uuid>,
    pub is_super_admin: bool,
    pub is_impersonating: bool,
}

impl ResolvedIdentity {
    /// Global visibility: a superadmin who is not impersonating anyone.
    pub fn sees_everything(&self) -> bool {
        self.is_super_admin && !self.is_impersonating
    }
}

impl IdentityContext {
    pub fn new(actor: User) -> Self {
        IdentityContext {
            actor,
            impersonated_company_id: None,
        }
    }

    /// Begin impersonating a company for support purposes.
    ///
    /// Returns `false` (and leaves the context unchanged) when the actor is
    /// not a superadmin.
    pub fn impersonate(&mut self, company_id: Uuid) -> bool {
        if self.actor.role != UserRole::SuperAdmin {
            tracing::warn!(
                actor = %self.actor.id,
                role = %self.actor.role,
                "impersonation attempt by non-superadmin rejected"
            );
            return false;
        }
        self.impersonated_company_id = Some(company_id);
        true
    }

    /// Stop impersonating; the active company falls back to the actor's own.
    ///
    /// Callers presenting tenant-specific views must also reset those views:
    /// scoped data rendered under the impersonated company must not remain
    /// on screen after this call.
    pub fn stop_impersonating(&mut self) {
        self.impersonated_company_id = None;
    }

    /// Compute the active company and visibility flags.
    pub fn resolve(&self) -> ResolvedIdentity {
        ResolvedIdentity {
            active_company_id: self.impersonated_company_id.or(self.actor.company_id),
            is_super_admin: self.actor.is_super_admin(),
            is_impersonating: self.impersonated_company_id.is_some(),
        }
    }
}

//! Tenant scoping filter.
//!
//! Pure functions that narrow a raw collection down to the records visible
//! to an identity context. This is the invariant-bearing center of the
//! system: every screen reads through these filters, and a bug here leaks
//! data across tenants.
//!
//! Policy notes:
//! - Order-preserving and idempotent: filtering never reorders records.
//! - Total: a record whose owning company is unset or dangling is silently
//!   invisible, never an error. A locked-out dashboard is a worse failure
//!   mode than an over-empty list.

use crate::store::EntityStore;
use opsdeck_core::models::Company;
use opsdeck_core::{IdentityContext, TenantScoped};

/// Narrow `records` to those visible to `ctx`.
///
/// A superadmin with no impersonation active sees everything; everyone else
/// sees exactly the records owned by their active company.
pub fn scope<'a, T: TenantScoped>(records: &'a [T], ctx: &IdentityContext) -> Vec<&'a T> {
    let resolved = ctx.resolve();
    if resolved.sees_everything() {
        return records.iter().collect();
    }
    match resolved.active_company_id {
        Some(active) => records
            .iter()
            .filter(|r| r.company_id() == Some(active))
            .collect(),
        None => Vec::new(),
    }
}

/// Owned-clone variant of [`scope`], for handing a scoped view across an
/// await point without borrowing the store.
pub fn scope_cloned<T: TenantScoped + Clone>(records: &[T], ctx: &IdentityContext) -> Vec<T> {
    scope(records, ctx).into_iter().cloned().collect()
}

/// Scoping rule for the companies collection itself.
///
/// Companies carry no owning tenant, so the match key is identity: a
/// non-superadmin (or an impersonating superadmin) sees exactly the company
/// that is currently active. This asymmetry is intentional - a regular
/// actor's own company record must stay visible even though it has no
/// `company_id` of its own.
pub fn scope_companies<'a>(companies: &'a [Company], ctx: &IdentityContext) -> Vec<&'a Company> {
    let resolved = ctx.resolve();
    if resolved.sees_everything() {
        return companies.iter().collect();
    }
    match resolved.active_company_id {
        Some(active) => companies.iter().filter(|c| c.id == active).collect(),
        None => Vec::new(),
    }
}

/// Scoped count of a countable resource, used by the entitlement gate.
pub(crate) fn scoped_lead_count(store: &EntityStore, ctx: &IdentityContext) -> usize {
    scope(&store.leads, ctx).len()
}

pub(crate) fn scoped_member_count(store: &EntityStore, ctx: &IdentityContext) -> usize {
    scope(&store.users, ctx).len()
}

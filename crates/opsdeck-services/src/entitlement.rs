//! Plan entitlement gate.
//!
//! Advisory pre-flight check of a feature or resource count against the
//! active company's subscription plan. The gate returns data only - it is
//! deliberately decoupled from the mutation coordinator so the same check
//! can disable a button, block a form submit, or drive an upsell notice.
//!
//! Fail-open policy: an unknown plan name (data drift) and an unresolvable
//! active company are both treated as allowed, logged at warn level. A
//! hard lockout over stale reference data is the failure mode this layer
//! refuses to have.

use crate::scoping::{scoped_lead_count, scoped_member_count};
use crate::store::EntityStore;
use opsdeck_core::models::{find_plan, PlanDefinition, DEFAULT_PLAN};
use opsdeck_core::IdentityContext;
use std::fmt;

/// Feature or resource gated by the subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKey {
    /// Countable: team members of the active company.
    Members,
    /// Countable: leads of the active company.
    Leads,
    /// Boolean: WhatsApp/messaging automation.
    MessagingAutomation,
    /// Boolean: AI-assisted lead search.
    AiLeadSearch,
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKey::Members => write!(f, "members"),
            FeatureKey::Leads => write!(f, "leads"),
            FeatureKey::MessagingAutomation => write!(f, "messaging_automation"),
            FeatureKey::AiLeadSearch => write!(f, "ai_lead_search"),
        }
    }
}

/// Outcome of an entitlement check. A denial is an expected value, not an
/// error; `reason` is safe to present to the actor as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitDecision {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl LimitDecision {
    fn allow() -> Self {
        LimitDecision {
            allowed: true,
            reason: None,
        }
    }

    fn deny(reason: String) -> Self {
        LimitDecision {
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// Check whether the active company's plan permits `feature` right now.
///
/// Countable features compare the current scoped count against the plan
/// limit; callers must run this before a mutation that would create a new
/// countable resource. The check is monotone: once denied at a count, it
/// stays denied at any higher count on the same plan.
pub fn check_limit(
    feature: FeatureKey,
    ctx: &IdentityContext,
    store: &EntityStore,
) -> LimitDecision {
    let resolved = ctx.resolve();
    if resolved.sees_everything() {
        return LimitDecision::allow();
    }

    let Some(company_id) = resolved.active_company_id else {
        tracing::warn!(
            actor = %ctx.actor.id,
            feature = %feature,
            "entitlement check with no active company; failing open"
        );
        return LimitDecision::allow();
    };

    let plan_name = store
        .company(company_id)
        .map(|c| c.plan_name().to_string())
        .unwrap_or_else(|| DEFAULT_PLAN.to_string());

    let Some(plan) = find_plan(&plan_name) else {
        tracing::warn!(
            company = %company_id,
            plan = %plan_name,
            "plan has no catalog entry; failing open"
        );
        return LimitDecision::allow();
    };

    match feature {
        FeatureKey::Members => {
            countable(scoped_member_count(store, ctx), plan.max_members, "team members", plan)
        }
        FeatureKey::Leads => countable(scoped_lead_count(store, ctx), plan.max_leads, "leads", plan),
        FeatureKey::MessagingAutomation => {
            boolean(plan.messaging_automation, "Messaging automation", plan)
        }
        FeatureKey::AiLeadSearch => boolean(plan.ai_lead_search, "AI lead search", plan),
    }
}

fn countable(count: usize, limit: u32, noun: &str, plan: &PlanDefinition) -> LimitDecision {
    if count >= limit as usize {
        LimitDecision::deny(format!(
            "The {} plan allows up to {} {}. Upgrade your plan to add more.",
            plan.name, limit, noun
        ))
    } else {
        LimitDecision::allow()
    }
}

fn boolean(enabled: bool, label: &str, plan: &PlanDefinition) -> LimitDecision {
    if enabled {
        LimitDecision::allow()
    } else {
        LimitDecision::deny(format!(
            "{} is not included in the {} plan. Upgrade to unlock it.",
            label, plan.name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use opsdeck_core::models::{
        BillingCycle, Company, Lead, LeadStatus, SubscriptionStatus, User, UserRole,
    };
    use uuid::Uuid;

    fn company_with_plan(plan: Option<&str>) -> Company {
        Company {
            id: Uuid::new_v4(),
            name: "Comp".to_string(),
            tax_id: None,
            plan: plan.map(String::from),
            subscription_status: SubscriptionStatus::Active,
            subscription_due_date: None,
            currency: "USD".to_string(),
            billing_cycle: BillingCycle::Monthly,
            payment_history: Vec::new(),
            payment_method: None,
            created_at: Utc::now(),
        }
    }

    fn lead(company_id: Uuid) -> Lead {
        Lead {
            id: Uuid::new_v4(),
            company_id,
            name: "Lead".to_string(),
            company_name: None,
            email: None,
            phone: None,
            source: None,
            status: LeadStatus::New,
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn ctx_for(company: &Company, role: UserRole) -> IdentityContext {
        IdentityContext::new(User {
            id: Uuid::new_v4(),
            company_id: Some(company.id),
            role,
            name: "Actor".to_string(),
            email: "actor@example.com".to_string(),
            password_hash: String::new(),
            phone: None,
            created_at: Utc::now(),
        })
    }

    fn store_with(company: Company, leads: Vec<Lead>) -> EntityStore {
        EntityStore {
            companies: vec![company],
            leads,
            ..EntityStore::default()
        }
    }

    #[test]
    fn starter_allows_under_lead_limit_and_denies_at_it() {
        let company = company_with_plan(Some("Starter"));
        let ctx = ctx_for(&company, UserRole::Admin);

        let store = store_with(company.clone(), (0..5).map(|_| lead(company.id)).collect());
        assert!(check_limit(FeatureKey::Leads, &ctx, &store).allowed);

        let store = store_with(company.clone(), (0..50).map(|_| lead(company.id)).collect());
        let decision = check_limit(FeatureKey::Leads, &ctx, &store);
        assert!(!decision.allowed);
        let reason = decision.reason.unwrap();
        assert!(reason.contains("Starter"));
        assert!(reason.contains("50"));
    }

    #[test]
    fn denial_is_monotone_in_count() {
        let company = company_with_plan(Some("Starter"));
        let ctx = ctx_for(&company, UserRole::Admin);
        for count in [50usize, 51, 80] {
            let store = store_with(
                company.clone(),
                (0..count).map(|_| lead(company.id)).collect(),
            );
            assert!(!check_limit(FeatureKey::Leads, &ctx, &store).allowed);
        }
        for count in [0usize, 1, 49] {
            let store = store_with(
                company.clone(),
                (0..count).map(|_| lead(company.id)).collect(),
            );
            assert!(check_limit(FeatureKey::Leads, &ctx, &store).allowed);
        }
    }

    #[test]
    fn other_tenants_leads_do_not_count() {
        let company = company_with_plan(Some("Starter"));
        let ctx = ctx_for(&company, UserRole::Admin);
        let mut leads: Vec<Lead> = (0..49).map(|_| lead(company.id)).collect();
        leads.extend((0..200).map(|_| lead(Uuid::new_v4())));
        let store = store_with(company.clone(), leads);
        assert!(check_limit(FeatureKey::Leads, &ctx, &store).allowed);
    }

    #[test]
    fn boolean_feature_denied_with_upsell_reason() {
        let company = company_with_plan(Some("Starter"));
        let ctx = ctx_for(&company, UserRole::Admin);
        let store = store_with(company, Vec::new());
        let decision = check_limit(FeatureKey::AiLeadSearch, &ctx, &store);
        assert!(!decision.allowed);
        assert!(decision.reason.unwrap().contains("Starter"));
    }

    #[test]
    fn enterprise_boolean_features_allowed() {
        let company = company_with_plan(Some("Enterprise"));
        let ctx = ctx_for(&company, UserRole::Admin);
        let store = store_with(company, Vec::new());
        assert!(check_limit(FeatureKey::MessagingAutomation, &ctx, &store).allowed);
        assert!(check_limit(FeatureKey::AiLeadSearch, &ctx, &store).allowed);
    }

    #[test]
    fn unset_plan_defaults_to_starter() {
        let company = company_with_plan(None);
        let ctx = ctx_for(&company, UserRole::Admin);
        let store = store_with(company.clone(), (0..50).map(|_| lead(company.id)).collect());
        let decision = check_limit(FeatureKey::Leads, &ctx, &store);
        assert!(!decision.allowed);
        assert!(decision.reason.unwrap().contains("Starter"));
    }

    #[test]
    fn unknown_plan_fails_open() {
        let company = company_with_plan(Some("Legacy Gold"));
        let ctx = ctx_for(&company, UserRole::Admin);
        let store = store_with(company.clone(), (0..500).map(|_| lead(company.id)).collect());
        assert!(check_limit(FeatureKey::Leads, &ctx, &store).allowed);
        assert!(check_limit(FeatureKey::AiLeadSearch, &ctx, &store).allowed);
    }

    #[test]
    fn superadmin_without_impersonation_bypasses_limits() {
        let company = company_with_plan(Some("Starter"));
        let store = store_with(company.clone(), (0..500).map(|_| lead(company.id)).collect());
        let ctx = IdentityContext::new(User {
            id: Uuid::new_v4(),
            company_id: None,
            role: UserRole::SuperAdmin,
            name: "Root".to_string(),
            email: "root@example.com".to_string(),
            password_hash: String::new(),
            phone: None,
            created_at: Utc::now(),
        });
        assert!(check_limit(FeatureKey::Leads, &ctx, &store).allowed);
        assert!(check_limit(FeatureKey::AiLeadSearch, &ctx, &store).allowed);
    }

    #[test]
    fn impersonating_superadmin_is_subject_to_the_tenant_plan() {
        let company = company_with_plan(Some("Starter"));
        let store = store_with(company.clone(), (0..50).map(|_| lead(company.id)).collect());
        let mut ctx = IdentityContext::new(User {
            id: Uuid::new_v4(),
            company_id: None,
            role: UserRole::SuperAdmin,
            name: "Root".to_string(),
            email: "root@example.com".to_string(),
            password_hash: String::new(),
            phone: None,
            created_at: Utc::now(),
        });
        ctx.impersonate(company.id);
        assert!(!check_limit(FeatureKey::Leads, &ctx, &store).allowed);
    }
}

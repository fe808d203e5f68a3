//! Shared fixtures for the service-layer integration tests.

#![allow(dead_code)]

use chrono::Utc;
use opsdeck_core::models::{
    BillingCycle, Client, Company, Lead, LeadStatus, Partner, SubscriptionStatus, User, UserRole,
};
use opsdeck_core::IdentityContext;
use opsdeck_services::MutationCoordinator;
use opsdeck_storage::{MemoryStorage, Snapshot, Storage};
use std::sync::Arc;
use uuid::Uuid;

pub fn company(name: &str, plan: Option<&str>) -> Company {
    Company {
        id: Uuid::new_v4(),
        name: name.to_string(),
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

pub fn user(role: UserRole, company_id: Option<Uuid>, email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        company_id,
        role,
        name: "Fixture User".to_string(),
        email: email.to_string(),
        password_hash: String::new(),
        phone: None,
        created_at: Utc::now(),
    }
}

pub fn admin_of(company: &Company) -> User {
    user(UserRole::Admin, Some(company.id), "admin@example.com")
}

pub fn super_admin() -> User {
    user(UserRole::SuperAdmin, None, "root@example.com")
}

pub fn client_of(company_id: Uuid, name: &str) -> Client {
    Client {
        id: Uuid::new_v4(),
        company_id,
        name: name.to_string(),
        email: None,
        phone: None,
        address: None,
        created_at: Utc::now(),
    }
}

pub fn partner_of(company_id: Uuid, name: &str) -> Partner {
    Partner {
        id: Uuid::new_v4(),
        company_id,
        name: name.to_string(),
        specialty: None,
        email: None,
        phone: None,
        is_available: true,
        created_at: Utc::now(),
    }
}

pub fn lead_of(company_id: Uuid, name: &str) -> Lead {
    Lead {
        id: Uuid::new_v4(),
        company_id,
        name: name.to_string(),
        company_name: None,
        email: None,
        phone: None,
        source: None,
        status: LeadStatus::New,
        messages: Vec::new(),
        created_at: Utc::now(),
    }
}

pub fn ctx(actor: &User) -> IdentityContext {
    IdentityContext::new(actor.clone())
}

/// Seeded backend plus a coordinator bootstrapped from it.
pub async fn coordinator_with(
    snapshot: Snapshot,
) -> (Arc<MemoryStorage>, Arc<MutationCoordinator>) {
    let storage = Arc::new(MemoryStorage::seeded(&snapshot).expect("seed storage"));
    let dyn_storage: Arc<dyn Storage> = storage.clone();
    let coordinator = MutationCoordinator::bootstrap(dyn_storage)
        .await
        .expect("bootstrap coordinator");
    (storage, Arc::new(coordinator))
}

//! In-memory entity store.
//!
//! The store exclusively owns the raw, un-scoped collections of every
//! entity type, populated from the storage collaborator's bulk load. It is
//! mutated only by the mutation coordinator (and the initial load); scoping
//! and entitlement are read-only consumers. Records are always replaced by
//! value, never mutated in place, so view recomputation observes changes.

use opsdeck_core::models::{
    Client, Company, Lead, Partner, Project, SaasProduct, Transaction, User,
};
use opsdeck_core::Entity;
use opsdeck_storage::Snapshot;
use uuid::Uuid;

/// Raw collections for the current session.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    pub users: Vec<User>,
    pub companies: Vec<Company>,
    pub clients: Vec<Client>,
    pub partners: Vec<Partner>,
    pub projects: Vec<Project>,
    pub saas_products: Vec<SaasProduct>,
    pub leads: Vec<Lead>,
    pub transactions: Vec<Transaction>,
}

impl EntityStore {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        EntityStore {
            users: snapshot.users,
            companies: snapshot.companies,
            clients: snapshot.clients,
            partners: snapshot.partners,
            projects: snapshot.projects,
            saas_products: snapshot.saas_products,
            leads: snapshot.leads,
            transactions: snapshot.transactions,
        }
    }

    pub fn company(&self, id: Uuid) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    /// Replace a company by id, or append it when absent.
    pub fn replace_company(&mut self, company: Company) {
        match self.companies.iter_mut().find(|c| c.id == company.id) {
            Some(existing) => *existing = company,
            None => self.companies.push(company),
        }
    }
}

/// Access to an entity kind's slot in the store.
///
/// Plays the role a per-entity repository would play against a database:
/// the coordinator stays generic and each entity type points it at the
/// right collection.
pub trait StoreCollection: Entity {
    fn slot(store: &EntityStore) -> &[Self];
    fn slot_mut(store: &mut EntityStore) -> &mut Vec<Self>;
}

impl StoreCollection for User {
    fn slot(store: &EntityStore) -> &[Self] {
        &store.users
    }
    fn slot_mut(store: &mut EntityStore) -> &mut Vec<Self> {
        &mut store.users
    }
}

impl StoreCollection for Client {
    fn slot(store: &EntityStore) -> &[Self] {
        &store.clients
    }
    fn slot_mut(store: &mut EntityStore) -> &mut Vec<Self> {
        &mut store.clients
    }
}

impl StoreCollection for Partner {
    fn slot(store: &EntityStore) -> &[Self] {
        &store.partners
    }
    fn slot_mut(store: &mut EntityStore) -> &mut Vec<Self> {
        &mut store.partners
    }
}

impl StoreCollection for Project {
    fn slot(store: &EntityStore) -> &[Self] {
        &store.projects
    }
    fn slot_mut(store: &mut EntityStore) -> &mut Vec<Self> {
        &mut store.projects
    }
}

impl StoreCollection for SaasProduct {
    fn slot(store: &EntityStore) -> &[Self] {
        &store.saas_products
    }
    fn slot_mut(store: &mut EntityStore) -> &mut Vec<Self> {
        &mut store.saas_products
    }
}

impl StoreCollection for Lead {
    fn slot(store: &EntityStore) -> &[Self] {
        &store.leads
    }
    fn slot_mut(store: &mut EntityStore) -> &mut Vec<Self> {
        &mut store.leads
    }
}

impl StoreCollection for Transaction {
    fn slot(store: &EntityStore) -> &[Self] {
        &store.transactions
    }
    fn slot_mut(store: &mut EntityStore) -> &mut Vec<Self> {
        &mut store.transactions
    }
}

//! Opsdeck Services Layer
//!
//! This crate is the **business service layer**: it owns the in-memory
//! entity store and everything that decides what an actor may see and do.
//! Reads flow through the tenant scoping filter, pre-flight permission
//! questions through the plan entitlement gate, and every mutation through
//! the coordinator's persist-then-commit path. Keep policy and coordination
//! here; keep persistence mechanics in opsdeck-storage.

pub mod auth;
pub mod billing;
pub mod entitlement;
pub mod mutation;
pub mod scoping;
pub mod store;
pub mod telemetry;

// Re-export the service facade
pub use auth::{AuthService, RegisterRequest};
pub use billing::SubscriptionService;
pub use entitlement::{check_limit, FeatureKey, LimitDecision};
pub use mutation::MutationCoordinator;
pub use scoping::{scope, scope_cloned, scope_companies};
pub use store::{EntityStore, StoreCollection};
pub use telemetry::init_telemetry;

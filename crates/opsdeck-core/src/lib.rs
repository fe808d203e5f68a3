//! Opsdeck Core Library
//!
//! This crate provides the domain models, identity context, plan catalog,
//! error types, and configuration shared across all opsdeck components.

pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, LogLevel};
pub use identity::{IdentityContext, ResolvedIdentity};
pub use models::{Collection, Entity, TenantScoped};
pub use storage_types::StorageKind;

//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Each sub-module represents a specific feature area.

mod client;
mod company;
mod entity;
mod lead;
mod partner;
mod plan;
mod project;
mod saas_product;
mod transaction;
mod user;

// Re-export all models for convenient imports
pub use client::*;
pub use company::*;
pub use entity::*;
pub use lead::*;
pub use partner::*;
pub use plan::*;
pub use project::*;
pub use saas_product::*;
pub use transaction::*;
pub use user::*;

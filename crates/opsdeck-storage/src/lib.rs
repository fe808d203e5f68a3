//! Opsdeck Storage Library
//!
//! This crate is the persistence-collaborator boundary. The rest of the
//! system talks to storage only through the [`Storage`] trait: one bulk
//! `fetch_all` per session, then `save` / `update` / `delete` per record.
//! Records cross this boundary as opaque JSON values; the backend's actual
//! wire or file format is its own concern.
//!
//! Two backends ship with the crate: an in-memory one for tests and
//! development, and a single-document JSON file with atomic replace-on-write.

pub mod factory;
pub mod jsonfile;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use jsonfile::JsonFileStorage;
pub use memory::MemoryStorage;
pub use opsdeck_core::StorageKind;
pub use traits::{Snapshot, Storage, StorageError, StorageResult};

//! Stele Persistence - database entities and persistence layer
//!
//! This crate provides:
//! - SeaORM entity definitions for the config and archive collections
//! - Persistence trait abstractions for unified storage
//! - SQL backend (MySQL/PostgreSQL/SQLite via SeaORM)
//! - In-memory backend for standalone mode and tests

pub mod entity;
pub mod memory;
pub mod model;
pub mod sql;
pub mod traits;

// Re-export sea-orm for convenience
pub use sea_orm;

// Re-export persistence traits
pub use traits::{ConfigPersistence, PersistenceService};

// Re-export backends
pub use memory::MemoryPersistService;
pub use sql::SqlPersistService;

// Re-export model types
pub use model::{
    ARCHIVE_RETENTION_LIMIT, ConfigArchiveStorageData, ConfigPatch, ConfigQuery,
    ConfigStorageData, NewConfig, StorageMode,
};

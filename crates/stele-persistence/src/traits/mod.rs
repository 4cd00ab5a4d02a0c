//! Persistence trait abstractions
//!
//! The service layer depends only on these traits, never on a concrete
//! backend, so the transactional flows can be exercised against the
//! in-memory backend without a database.

pub mod config;

use async_trait::async_trait;

pub use config::ConfigPersistence;

use crate::model::StorageMode;

/// Unified persistence service interface
#[async_trait]
pub trait PersistenceService: ConfigPersistence {
    /// Which storage backend this service uses
    fn storage_mode(&self) -> StorageMode;

    /// Check backend connectivity
    async fn health_check(&self) -> anyhow::Result<()>;
}

//! Config persistence trait
//!
//! Defines the interface for configuration and archive storage
//! operations. The two mutating flows (`config_update`,
//! `config_delete`) are atomic units: each backend runs the archive
//! step and the config mutation inside a single transaction scope, and
//! either both take effect or neither does.

use async_trait::async_trait;

use stele_common::Page;

use crate::model::{
    ConfigArchiveStorageData, ConfigPatch, ConfigQuery, ConfigStorageData, NewConfig,
};

/// Configuration persistence operations
#[async_trait]
pub trait ConfigPersistence: Send + Sync {
    /// Find a config by its id, regardless of tenant
    async fn config_find_by_id(&self, id: i64) -> anyhow::Result<Option<ConfigStorageData>>;

    /// Probe for a live record with the same (name, tenant, type, subtype).
    /// Absence is signaled as `Ok(None)`, never as an error value.
    async fn config_find_duplicate(
        &self,
        tenant_id: &str,
        name: &str,
        r#type: &str,
        subtype: Option<&str>,
    ) -> anyhow::Result<Option<ConfigStorageData>>;

    /// List configs matching the filter. The returned `total_count`
    /// reflects the filter, independent of the skip/limit window.
    async fn config_search_page(
        &self,
        query: &ConfigQuery,
    ) -> anyhow::Result<Page<ConfigStorageData>>;

    /// Insert a new config record and return it as stored
    async fn config_insert(&self, config: NewConfig) -> anyhow::Result<ConfigStorageData>;

    /// Atomically snapshot the current record into the archive (evicting
    /// the oldest entry if the retention ceiling is exceeded) and apply
    /// the patch. Returns `Ok(None)` when no record matches (id, tenant).
    async fn config_update(
        &self,
        id: i64,
        tenant_id: &str,
        patch: ConfigPatch,
    ) -> anyhow::Result<Option<ConfigStorageData>>;

    /// Atomically purge all archive entries for the config and delete
    /// the record matched by id *and* tenant. Returns whether a record
    /// was deleted.
    async fn config_delete(&self, id: i64, tenant_id: &str) -> anyhow::Result<bool>;

    /// All archive entries for a config, oldest version first
    async fn archive_list(
        &self,
        config_id: i64,
    ) -> anyhow::Result<Vec<ConfigArchiveStorageData>>;

    /// Count of live archive entries for a config
    async fn archive_count(&self, config_id: i64) -> anyhow::Result<u64>;
}

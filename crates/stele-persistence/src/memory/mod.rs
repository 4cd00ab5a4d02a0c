//! In-memory persistence backend
//!
//! Serves two purposes: a standalone storage mode for single-node runs
//! without an external database, and the backend for exercising the
//! transactional flows in tests. All state lives behind one mutex; a
//! mutating flow performs every fallible step before touching the maps,
//! so each flow is all-or-nothing exactly like the SQL transactions.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Local;
use parking_lot::Mutex;

use stele_common::{Page, SteleError};

use crate::model::*;
use crate::traits::*;

/// In-memory persistence service
pub struct MemoryPersistService {
    store: Mutex<Store>,
    fail_next_snapshot: AtomicBool,
}

struct Store {
    configs: BTreeMap<i64, ConfigStorageData>,
    archives: BTreeMap<i64, ConfigArchiveStorageData>,
    next_config_id: i64,
    next_archive_id: i64,
}

fn now_millis() -> i64 {
    Local::now().naive_local().and_utc().timestamp_millis()
}

impl Default for MemoryPersistService {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPersistService {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store {
                configs: BTreeMap::new(),
                archives: BTreeMap::new(),
                next_config_id: 1,
                next_archive_id: 1,
            }),
            fail_next_snapshot: AtomicBool::new(false),
        }
    }

    /// Make the next `config_update` fail at the archive-insert step,
    /// before any state is touched. Used to verify rollback behavior.
    pub fn fail_next_snapshot(&self) {
        self.fail_next_snapshot.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PersistenceService for MemoryPersistService {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::Memory
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ConfigPersistence for MemoryPersistService {
    async fn config_find_by_id(&self, id: i64) -> anyhow::Result<Option<ConfigStorageData>> {
        Ok(self.store.lock().configs.get(&id).cloned())
    }

    async fn config_find_duplicate(
        &self,
        tenant_id: &str,
        name: &str,
        r#type: &str,
        subtype: Option<&str>,
    ) -> anyhow::Result<Option<ConfigStorageData>> {
        let store = self.store.lock();
        let found = store
            .configs
            .values()
            .find(|c| {
                c.tenant_id == tenant_id
                    && c.name == name
                    && c.r#type == r#type
                    && c.subtype.as_deref() == subtype
            })
            .cloned();
        Ok(found)
    }

    async fn config_search_page(
        &self,
        query: &ConfigQuery,
    ) -> anyhow::Result<Page<ConfigStorageData>> {
        let store = self.store.lock();
        let matches: Vec<&ConfigStorageData> = store
            .configs
            .values()
            .filter(|c| c.tenant_id == query.tenant_id)
            .filter(|c| query.r#type.as_ref().is_none_or(|t| &c.r#type == t))
            .filter(|c| query.subtype.as_ref().is_none_or(|s| c.subtype.as_ref() == Some(s)))
            .filter(|c| query.tag.as_ref().is_none_or(|t| c.tags.contains(t)))
            .collect();

        let total_count = matches.len() as u64;
        let page_items = matches
            .into_iter()
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .cloned()
            .collect();

        Ok(Page::new(total_count, query.skip, query.limit, page_items))
    }

    async fn config_insert(&self, config: NewConfig) -> anyhow::Result<ConfigStorageData> {
        let mut store = self.store.lock();
        let id = store.next_config_id;
        store.next_config_id += 1;
        let now = now_millis();

        let stored = ConfigStorageData {
            id,
            name: config.name,
            r#type: config.r#type,
            subtype: config.subtype,
            tags: config.tags,
            tenant_id: config.tenant_id,
            created_by: config.created_by.clone(),
            last_updated_by: config.created_by,
            metadata: config.metadata,
            created_time: now,
            modified_time: now,
        };

        store.configs.insert(id, stored.clone());
        Ok(stored)
    }

    async fn config_update(
        &self,
        id: i64,
        tenant_id: &str,
        patch: ConfigPatch,
    ) -> anyhow::Result<Option<ConfigStorageData>> {
        let mut store = self.store.lock();

        let Some(existing) = store
            .configs
            .get(&id)
            .filter(|c| c.tenant_id == tenant_id)
            .cloned()
        else {
            return Ok(None);
        };

        if self.fail_next_snapshot.swap(false, Ordering::SeqCst) {
            return Err(anyhow::Error::new(SteleError::DatabaseError(
                "injected archive insert failure".to_string(),
            ))
            .context("failed to archive config before update"));
        }

        // Snapshot the pre-update state. Version is the highest existing
        // version plus one, keeping the sequence gapless under eviction.
        let max_version = store
            .archives
            .values()
            .filter(|a| a.config_id == id)
            .map(|a| a.version)
            .max()
            .unwrap_or(0);

        let archive_id = store.next_archive_id;
        store.next_archive_id += 1;
        store.archives.insert(
            archive_id,
            ConfigArchiveStorageData {
                id: archive_id,
                config_id: id,
                version: max_version + 1,
                name: existing.name.clone(),
                r#type: existing.r#type.clone(),
                subtype: existing.subtype.clone(),
                tags: existing.tags.clone(),
                tenant_id: existing.tenant_id.clone(),
                created_by: existing.created_by.clone(),
                last_updated_by: existing.last_updated_by.clone(),
                metadata: existing.metadata.clone(),
                created_time: existing.created_time,
                modified_time: existing.modified_time,
                archived_by: patch.last_updated_by.clone(),
                archived_time: now_millis(),
            },
        );

        // FIFO eviction: one entry per update, lowest version first
        let count = store.archives.values().filter(|a| a.config_id == id).count() as u64;
        if count > ARCHIVE_RETENTION_LIMIT {
            if let Some(oldest_id) = store
                .archives
                .values()
                .filter(|a| a.config_id == id)
                .min_by_key(|a| a.version)
                .map(|a| a.id)
            {
                store.archives.remove(&oldest_id);
            }
        }

        let mut updated = existing;
        if let Some(tags) = patch.tags {
            updated.tags = tags;
        }
        if let Some(metadata) = patch.metadata {
            updated.metadata = Some(metadata);
        }
        updated.last_updated_by = patch.last_updated_by;
        updated.modified_time = now_millis();

        store.configs.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn config_delete(&self, id: i64, tenant_id: &str) -> anyhow::Result<bool> {
        let mut store = self.store.lock();

        let owned = store
            .configs
            .get(&id)
            .is_some_and(|c| c.tenant_id == tenant_id);
        if !owned {
            return Ok(false);
        }

        store.archives.retain(|_, a| a.config_id != id);
        store.configs.remove(&id);
        Ok(true)
    }

    async fn archive_list(
        &self,
        config_id: i64,
    ) -> anyhow::Result<Vec<ConfigArchiveStorageData>> {
        let store = self.store.lock();
        let mut items: Vec<ConfigArchiveStorageData> = store
            .archives
            .values()
            .filter(|a| a.config_id == config_id)
            .cloned()
            .collect();
        items.sort_by_key(|a| a.version);
        Ok(items)
    }

    async fn archive_count(&self, config_id: i64) -> anyhow::Result<u64> {
        let store = self.store.lock();
        Ok(store
            .archives
            .values()
            .filter(|a| a.config_id == config_id)
            .count() as u64)
    }
}

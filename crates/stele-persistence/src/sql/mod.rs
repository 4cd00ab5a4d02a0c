//! SQL-based persistence backend (MySQL/PostgreSQL/SQLite via SeaORM)
//!
//! Implements the persistence traits over a SeaORM `DatabaseConnection`.
//! The two mutating flows are atomic units: `config_update` runs
//! snapshot-and-evict followed by the field-level update, and
//! `config_delete` runs archive purge followed by the record delete,
//! each inside a single `begin`/`commit` scope. A transaction dropped on
//! error rolls back, so no partial state is ever visible.

mod archive;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Local;
use sea_orm::{prelude::Expr, sea_query::Asterisk, *};

use stele_common::{Page, SteleError};

use crate::entity::{config_archive, config_record};
use crate::model::*;
use crate::traits::*;

/// External database persistence service
pub struct SqlPersistService {
    db: DatabaseConnection,
}

impl SqlPersistService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Substrings that identify a concurrent-transaction conflict across the
/// supported backends. Such failures are surfaced as a retryable
/// `WriteConflict`, never as a corrupted version sequence.
const CONFLICT_MARKERS: [&str; 4] = [
    "deadlock",
    "could not serialize",
    "database is locked",
    "lock wait timeout",
];

fn classify(op: &'static str, e: anyhow::Error) -> anyhow::Error {
    let message = e.to_string();
    let lower = message.to_lowercase();
    if CONFLICT_MARKERS.iter().any(|m| lower.contains(m)) {
        anyhow::Error::new(SteleError::WriteConflict(message)).context(op)
    } else {
        e.context(op)
    }
}

fn subtype_filter(
    column: config_record::Column,
    subtype: Option<&str>,
) -> sea_orm::sea_query::SimpleExpr {
    match subtype {
        Some(subtype) => column.eq(subtype),
        None => column.is_null(),
    }
}

fn config_entity_to_storage(model: config_record::Model) -> ConfigStorageData {
    ConfigStorageData {
        id: model.id,
        name: model.name,
        r#type: model.r#type,
        subtype: model.subtype,
        tags: decode_tags(&model.tags),
        tenant_id: model.tenant_id,
        created_by: model.created_by,
        last_updated_by: model.last_updated_by,
        metadata: model.metadata.as_deref().and_then(decode_metadata),
        created_time: model.gmt_create.and_utc().timestamp_millis(),
        modified_time: model.gmt_modified.and_utc().timestamp_millis(),
    }
}

fn archive_entity_to_storage(model: config_archive::Model) -> ConfigArchiveStorageData {
    ConfigArchiveStorageData {
        id: model.id,
        config_id: model.config_id,
        version: model.version,
        name: model.name,
        r#type: model.r#type,
        subtype: model.subtype,
        tags: decode_tags(&model.tags),
        tenant_id: model.tenant_id,
        created_by: model.created_by,
        last_updated_by: model.last_updated_by,
        metadata: model.metadata.as_deref().and_then(decode_metadata),
        created_time: model.gmt_create.and_utc().timestamp_millis(),
        modified_time: model.gmt_modified.and_utc().timestamp_millis(),
        archived_by: model.archived_by,
        archived_time: model.gmt_archived.and_utc().timestamp_millis(),
    }
}

#[async_trait]
impl PersistenceService for SqlPersistService {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::ExternalDb
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        self.db.ping().await.context("database ping failed")?;
        Ok(())
    }
}

#[async_trait]
impl ConfigPersistence for SqlPersistService {
    async fn config_find_by_id(&self, id: i64) -> anyhow::Result<Option<ConfigStorageData>> {
        let result = config_record::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("failed to get config")?;
        Ok(result.map(config_entity_to_storage))
    }

    async fn config_find_duplicate(
        &self,
        tenant_id: &str,
        name: &str,
        r#type: &str,
        subtype: Option<&str>,
    ) -> anyhow::Result<Option<ConfigStorageData>> {
        let result = config_record::Entity::find()
            .filter(config_record::Column::TenantId.eq(tenant_id))
            .filter(config_record::Column::Name.eq(name))
            .filter(config_record::Column::Type.eq(r#type))
            .filter(subtype_filter(config_record::Column::Subtype, subtype))
            .one(&self.db)
            .await
            .context("failed to probe for duplicate config")?;

        Ok(result.map(config_entity_to_storage))
    }

    async fn config_search_page(
        &self,
        query: &ConfigQuery,
    ) -> anyhow::Result<Page<ConfigStorageData>> {
        let mut base_select = config_record::Entity::find()
            .filter(config_record::Column::TenantId.eq(query.tenant_id.as_str()));

        if let Some(ref r#type) = query.r#type {
            base_select = base_select.filter(config_record::Column::Type.eq(r#type));
        }
        if let Some(ref subtype) = query.subtype {
            base_select = base_select.filter(config_record::Column::Subtype.eq(subtype));
        }
        if let Some(ref tag) = query.tag {
            // Tags are a JSON string array; matching the quoted form is a
            // membership test for tag values without '"' or '\'.
            base_select =
                base_select.filter(config_record::Column::Tags.contains(format!("\"{}\"", tag)));
        }

        let total_count = base_select
            .clone()
            .select_only()
            .column_as(Expr::col(Asterisk).count(), "count")
            .into_tuple::<i64>()
            .one(&self.db)
            .await
            .context("failed to count configs")?
            .unwrap_or_default() as u64;

        if total_count == 0 {
            return Ok(Page::empty(query.skip, query.limit));
        }

        let items = base_select
            .order_by_asc(config_record::Column::Id)
            .offset(query.skip)
            .limit(query.limit)
            .all(&self.db)
            .await
            .context("failed to search configs")?
            .into_iter()
            .map(config_entity_to_storage)
            .collect();

        Ok(Page::new(total_count, query.skip, query.limit, items))
    }

    async fn config_insert(&self, config: NewConfig) -> anyhow::Result<ConfigStorageData> {
        let now = Local::now().naive_local();

        let model = config_record::ActiveModel {
            name: Set(config.name),
            r#type: Set(config.r#type),
            subtype: Set(config.subtype),
            tags: Set(encode_tags(&config.tags)),
            tenant_id: Set(config.tenant_id),
            created_by: Set(config.created_by.clone()),
            last_updated_by: Set(config.created_by),
            metadata: Set(config.metadata.as_ref().map(encode_metadata)),
            gmt_create: Set(now),
            gmt_modified: Set(now),
            ..Default::default()
        };

        let result = config_record::Entity::insert(model)
            .exec(&self.db)
            .await
            .context("failed to create config")?;

        let stored = config_record::Entity::find_by_id(result.last_insert_id)
            .one(&self.db)
            .await
            .context("failed to load config after insert")?
            .ok_or_else(|| {
                anyhow::anyhow!("config {} missing immediately after insert", result.last_insert_id)
            })?;

        Ok(config_entity_to_storage(stored))
    }

    async fn config_update(
        &self,
        id: i64,
        tenant_id: &str,
        patch: ConfigPatch,
    ) -> anyhow::Result<Option<ConfigStorageData>> {
        let now = Local::now().naive_local();

        let tx = self
            .db
            .begin()
            .await
            .map_err(|e| classify("failed to open update transaction", e.into()))?;

        // Read inside the transaction so the snapshot copies exactly the
        // state this update supersedes, not a stale pre-transaction read.
        let Some(entity) = config_record::Entity::find()
            .filter(config_record::Column::Id.eq(id))
            .filter(config_record::Column::TenantId.eq(tenant_id))
            .one(&tx)
            .await
            .map_err(|e| classify("failed to load config for update", e.into()))?
        else {
            return Ok(None);
        };

        archive::snapshot_and_evict(&tx, &entity, &patch.last_updated_by, now)
            .await
            .map_err(|e| classify("failed to archive config before update", e))?;

        let mut active: config_record::ActiveModel = entity.into();
        if let Some(ref tags) = patch.tags {
            active.tags = Set(encode_tags(tags));
        }
        if let Some(ref metadata) = patch.metadata {
            active.metadata = Set(Some(encode_metadata(metadata)));
        }
        active.last_updated_by = Set(patch.last_updated_by);
        active.gmt_modified = Set(now);

        let updated = active
            .update(&tx)
            .await
            .map_err(|e| classify("failed to update config", e.into()))?;

        tx.commit()
            .await
            .map_err(|e| classify("failed to commit update transaction", e.into()))?;

        Ok(Some(config_entity_to_storage(updated)))
    }

    async fn config_delete(&self, id: i64, tenant_id: &str) -> anyhow::Result<bool> {
        let tx = self
            .db
            .begin()
            .await
            .map_err(|e| classify("failed to open delete transaction", e.into()))?;

        let Some(entity) = config_record::Entity::find()
            .filter(config_record::Column::Id.eq(id))
            .filter(config_record::Column::TenantId.eq(tenant_id))
            .one(&tx)
            .await
            .map_err(|e| classify("failed to load config for delete", e.into()))?
        else {
            return Ok(false);
        };

        archive::purge_all(&tx, entity.id)
            .await
            .map_err(|e| classify("failed to purge config archives", e))?;

        // Matched by id and tenant so a mismatched tenant can never
        // delete the wrong record.
        config_record::Entity::delete_many()
            .filter(config_record::Column::Id.eq(entity.id))
            .filter(config_record::Column::TenantId.eq(tenant_id))
            .exec(&tx)
            .await
            .map_err(|e| classify("failed to delete config", e.into()))?;

        tx.commit()
            .await
            .map_err(|e| classify("failed to commit delete transaction", e.into()))?;

        Ok(true)
    }

    async fn archive_list(
        &self,
        config_id: i64,
    ) -> anyhow::Result<Vec<ConfigArchiveStorageData>> {
        let items = config_archive::Entity::find()
            .filter(config_archive::Column::ConfigId.eq(config_id))
            .order_by_asc(config_archive::Column::Version)
            .all(&self.db)
            .await
            .context("failed to list config archives")?
            .into_iter()
            .map(archive_entity_to_storage)
            .collect();

        Ok(items)
    }

    async fn archive_count(&self, config_id: i64) -> anyhow::Result<u64> {
        let count = config_archive::Entity::find()
            .filter(config_archive::Column::ConfigId.eq(config_id))
            .count(&self.db)
            .await
            .context("failed to count config archives")?;

        Ok(count)
    }
}

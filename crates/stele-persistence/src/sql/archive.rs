//! Archive management inside a transaction scope
//!
//! These functions are generic over `ConnectionTrait` so they always run
//! against the caller's session — inside `config_update` and
//! `config_delete` that is the open transaction, which is what makes the
//! snapshot/evict and purge steps atomic with the config mutation.

use chrono::NaiveDateTime;
use sea_orm::{prelude::Expr, *};

use crate::entity::{config_archive, config_record};
use crate::model::ARCHIVE_RETENTION_LIMIT;

/// Snapshot the configuration as it currently stands into a new archive
/// entry, then evict the lowest-version entry if the retention ceiling
/// was exceeded.
///
/// The new version is the highest existing version plus one (equal to
/// count + 1 until eviction starts), which keeps the per-config version
/// sequence strictly increasing with no gaps. Exactly one entry is
/// evicted per update, so the ceiling is never exceeded by more than the
/// single insertion.
pub(crate) async fn snapshot_and_evict<C: ConnectionTrait>(
    conn: &C,
    config: &config_record::Model,
    archived_by: &str,
    now: NaiveDateTime,
) -> anyhow::Result<()> {
    let count = config_archive::Entity::find()
        .filter(config_archive::Column::ConfigId.eq(config.id))
        .count(conn)
        .await?;

    let max_version = config_archive::Entity::find()
        .select_only()
        .column_as(Expr::col(config_archive::Column::Version).max(), "max_version")
        .filter(config_archive::Column::ConfigId.eq(config.id))
        .into_tuple::<Option<i64>>()
        .one(conn)
        .await?
        .flatten()
        .unwrap_or(0);

    let snapshot = config_archive::ActiveModel {
        config_id: Set(config.id),
        version: Set(max_version + 1),
        name: Set(config.name.clone()),
        r#type: Set(config.r#type.clone()),
        subtype: Set(config.subtype.clone()),
        tags: Set(config.tags.clone()),
        tenant_id: Set(config.tenant_id.clone()),
        created_by: Set(config.created_by.clone()),
        last_updated_by: Set(config.last_updated_by.clone()),
        metadata: Set(config.metadata.clone()),
        gmt_create: Set(config.gmt_create),
        gmt_modified: Set(config.gmt_modified),
        archived_by: Set(archived_by.to_string()),
        gmt_archived: Set(now),
        ..Default::default()
    };

    config_archive::Entity::insert(snapshot).exec(conn).await?;

    if count + 1 > ARCHIVE_RETENTION_LIMIT {
        // FIFO by version: the lowest version is the oldest entry
        if let Some(oldest) = config_archive::Entity::find()
            .filter(config_archive::Column::ConfigId.eq(config.id))
            .order_by_asc(config_archive::Column::Version)
            .one(conn)
            .await?
        {
            config_archive::Entity::delete_by_id(oldest.id)
                .exec(conn)
                .await?;
        }
    }

    Ok(())
}

/// Delete every archive entry referencing the configuration.
pub(crate) async fn purge_all<C: ConnectionTrait>(conn: &C, config_id: i64) -> anyhow::Result<()> {
    config_archive::Entity::delete_many()
        .filter(config_archive::Column::ConfigId.eq(config_id))
        .exec(conn)
        .await?;

    Ok(())
}

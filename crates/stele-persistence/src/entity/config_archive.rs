//! Configuration archive entity
//!
//! An immutable snapshot of a configuration record as it stood
//! immediately before an update was applied. Referential integrity with
//! `config_record` is maintained by transactional discipline in the
//! persistence layer, not by a foreign-key constraint.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "config_archive")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Back-reference to the owning config record
    pub config_id: i64,
    /// 1-based, strictly increasing per config
    pub version: i64,
    pub name: String,
    pub r#type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub subtype: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub tags: String,
    pub tenant_id: String,
    pub created_by: String,
    pub last_updated_by: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub metadata: Option<String>,
    /// Timestamps copied from the record at snapshot time
    pub gmt_create: DateTime,
    pub gmt_modified: DateTime,
    /// Actor whose update triggered the snapshot
    pub archived_by: String,
    pub gmt_archived: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

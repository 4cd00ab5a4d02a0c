//! Configuration record entity
//!
//! A tenant-owned configuration record. `(name, tenant_id, type, subtype)`
//! is unique among live records; `tags` holds a JSON string array and
//! `metadata` a JSON object, both in text columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "config_record")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub r#type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub subtype: Option<String>,
    /// JSON string array; semantically an unordered set
    #[sea_orm(column_type = "Text")]
    pub tags: String,
    pub tenant_id: String,
    pub created_by: String,
    pub last_updated_by: String,
    /// JSON object governed by the (type, subtype) schema
    #[sea_orm(column_type = "Text", nullable)]
    pub metadata: Option<String>,
    pub gmt_create: DateTime,
    pub gmt_modified: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

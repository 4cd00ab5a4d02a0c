//! Request/response models and shared application state

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use stele_persistence::{ConfigArchiveStorageData, ConfigStorageData, PersistenceService};
use stele_registry::SchemaRegistry;

use crate::service::ConfigService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    config_service: ConfigService,
}

impl AppState {
    pub fn new(
        persistence: Arc<dyn PersistenceService>,
        registry: Arc<SchemaRegistry>,
    ) -> Self {
        Self {
            config_service: ConfigService::new(persistence, registry),
        }
    }

    pub fn config_service(&self) -> &ConfigService {
        &self.config_service
    }
}

/// Body of a create request
#[derive(Clone, Debug, Deserialize)]
pub struct CreateConfigParam {
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub subtype: Option<String>,
    pub tags: Option<Vec<String>>,
    pub metadata: Option<Map<String, Value>>,
}

/// Body of an update request.
///
/// `name`, `type` and `subtype` are deserialized only so their presence
/// can be rejected: those fields are immutable after creation.
#[derive(Clone, Debug, Deserialize)]
pub struct UpdateConfigParam {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub subtype: Option<String>,
    pub tags: Option<Vec<String>>,
    pub metadata: Option<Map<String, Value>>,
}

/// Query string of a list request
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ConfigQueryParam {
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub subtype: Option<String>,
    pub tag: Option<String>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

/// A configuration record as returned by the API. Ids are serialized as
/// strings, timestamps as epoch milliseconds.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub subtype: Option<String>,
    pub tags: Vec<String>,
    pub tenant_id: String,
    pub created_by: String,
    pub last_updated_by: String,
    pub metadata: Option<Map<String, Value>>,
    pub created_time: i64,
    pub modified_time: i64,
}

impl From<ConfigStorageData> for ConfigResponse {
    fn from(item: ConfigStorageData) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name,
            r#type: item.r#type,
            subtype: item.subtype,
            tags: item.tags,
            tenant_id: item.tenant_id,
            created_by: item.created_by,
            last_updated_by: item.last_updated_by,
            metadata: item.metadata,
            created_time: item.created_time,
            modified_time: item.modified_time,
        }
    }
}

/// An archive entry as returned by the API
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveResponse {
    pub id: String,
    pub config_id: String,
    pub version: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub subtype: Option<String>,
    pub tags: Vec<String>,
    pub tenant_id: String,
    pub created_by: String,
    pub last_updated_by: String,
    pub metadata: Option<Map<String, Value>>,
    pub created_time: i64,
    pub modified_time: i64,
    pub archived_by: String,
    pub archived_time: i64,
}

impl From<ConfigArchiveStorageData> for ArchiveResponse {
    fn from(item: ConfigArchiveStorageData) -> Self {
        Self {
            id: item.id.to_string(),
            config_id: item.config_id.to_string(),
            version: item.version,
            name: item.name,
            r#type: item.r#type,
            subtype: item.subtype,
            tags: item.tags,
            tenant_id: item.tenant_id,
            created_by: item.created_by,
            last_updated_by: item.last_updated_by,
            metadata: item.metadata,
            created_time: item.created_time,
            modified_time: item.modified_time,
            archived_by: item.archived_by,
            archived_time: item.archived_time,
        }
    }
}

/// Body of a list response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfigListResponse {
    pub configs: Vec<ConfigResponse>,
    pub total: u64,
    pub limit: u64,
    pub skip: u64,
}

/// Body of an archive-list response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArchiveListResponse {
    pub archives: Vec<ArchiveResponse>,
    pub total: u64,
}

//! Storage-shape models for persistence operations
//!
//! These are the record shapes the service layer exchanges with any
//! backend: backends convert to and from their own representation
//! (SeaORM entities, in-memory rows).

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Maximum number of retained archive entries per configuration.
pub const ARCHIVE_RETENTION_LIMIT: u64 = 10;

/// Storage backend selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageMode {
    ExternalDb,
    Memory,
}

impl Display for StorageMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageMode::ExternalDb => write!(f, "external-db"),
            StorageMode::Memory => write!(f, "memory"),
        }
    }
}

/// A configuration record as stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigStorageData {
    pub id: i64,
    pub name: String,
    pub r#type: String,
    pub subtype: Option<String>,
    pub tags: Vec<String>,
    pub tenant_id: String,
    pub created_by: String,
    pub last_updated_by: String,
    pub metadata: Option<Map<String, Value>>,
    /// Epoch milliseconds
    pub created_time: i64,
    pub modified_time: i64,
}

/// An archive entry as stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigArchiveStorageData {
    pub id: i64,
    pub config_id: i64,
    pub version: i64,
    pub name: String,
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

/// Fields for inserting a new configuration record.
#[derive(Clone, Debug)]
pub struct NewConfig {
    pub name: String,
    pub r#type: String,
    pub subtype: Option<String>,
    pub tags: Vec<String>,
    pub tenant_id: String,
    pub created_by: String,
    pub metadata: Option<Map<String, Value>>,
}

/// Mutable fields of an update. `name`, `type`, `subtype` and
/// `tenant_id` are immutable and have no place here by construction.
#[derive(Clone, Debug)]
pub struct ConfigPatch {
    pub tags: Option<Vec<String>>,
    pub metadata: Option<Map<String, Value>>,
    pub last_updated_by: String,
}

/// Filter and window for listing configurations. `tenant_id` is always
/// required; the service layer normalizes `limit` before this reaches a
/// backend.
#[derive(Clone, Debug)]
pub struct ConfigQuery {
    pub tenant_id: String,
    pub r#type: Option<String>,
    pub subtype: Option<String>,
    pub tag: Option<String>,
    pub skip: u64,
    pub limit: u64,
}

/// Encode a tag set as a JSON string array for a text column.
pub fn encode_tags(tags: &[String]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a JSON string array from a text column.
pub fn decode_tags(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Encode a metadata map as a JSON object for a text column.
pub fn encode_metadata(metadata: &Map<String, Value>) -> String {
    Value::Object(metadata.clone()).to_string()
}

/// Decode a JSON object from a text column.
pub fn decode_metadata(raw: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

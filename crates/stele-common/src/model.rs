//! Shared models for Stele
//!
//! - `ActorContext`: resolved actor/tenant identity attached to every request
//! - `Page`: generic pagination envelope (skip/limit windowed)
//! - `ValidationOutcome`: structured result of a metadata schema validation

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Resolved identity of the acting user and tenant.
///
/// Populated by the authentication collaborator at the request boundary
/// and threaded explicitly through every service and persistence
/// operation. Tenant scoping is an equality filter on `tenant_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
    pub actor_id: String,
    pub tenant_id: String,
}

impl ActorContext {
    pub fn new(actor_id: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            tenant_id: tenant_id.into(),
        }
    }
}

/// Generic pagination envelope.
///
/// `total_count` always reflects the filter, never the page window.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub total_count: u64,
    pub skip: u64,
    pub limit: u64,
    pub page_items: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            total_count: 0,
            skip: 0,
            limit: 0,
            page_items: vec![],
        }
    }
}

impl<T> Page<T> {
    pub fn new(total_count: u64, skip: u64, limit: u64, page_items: Vec<T>) -> Self {
        Self {
            total_count,
            skip,
            limit,
            page_items,
        }
    }

    pub fn empty(skip: u64, limit: u64) -> Self {
        Self {
            total_count: 0,
            skip,
            limit,
            page_items: vec![],
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total_count: self.total_count,
            skip: self.skip,
            limit: self.limit,
            page_items: self.page_items.into_iter().map(f).collect(),
        }
    }
}

/// Structured result of validating a metadata map against its declared
/// (type, subtype) schema.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: vec![],
        }
    }

    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            errors,
        }
    }
}

impl Display for ValidationOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.valid {
            write!(f, "valid")
        } else {
            write!(f, "{}", self.errors.join("; "))
        }
    }
}

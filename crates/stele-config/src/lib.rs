//! Stele Config - configuration record management
//!
//! Service-layer rules (validation, tenant scoping, uniqueness) and the
//! HTTP API for configuration records and their archive log. All storage
//! access goes through the persistence traits so the same rules apply to
//! both the external-database and in-memory backends.

pub mod api;
pub mod model;
pub mod service;

pub use model::AppState;
pub use service::ConfigService;

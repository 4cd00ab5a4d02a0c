//! Stele Common - shared types, errors, and models
//!
//! This crate provides:
//! - `SteleError`: application-specific error enum
//! - `ErrorCode`: structured error codes for API responses
//! - Shared models: `ActorContext`, `Page`, `ValidationOutcome`

pub mod error;
pub mod model;

pub use error::{ErrorCode, SteleError};
pub use model::{ActorContext, Page, ValidationOutcome};

//! Error types and error codes for Stele
//!
//! This module defines:
//! - `SteleError`: Application-specific error enum
//! - `ErrorCode`: Structured error codes for API responses

use serde::{Deserialize, Serialize};

use crate::model::ValidationOutcome;

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum SteleError {
    #[error("caused: {0}")]
    IllegalArgument(String),

    #[error("metadata validation failed: {0}")]
    SchemaValidation(ValidationOutcome),

    #[error("config with this name already exists for this tenant, type and subtype")]
    AlreadyExists,

    #[error("{0} not found")]
    NotFound(String),

    #[error("write conflict: {0}")]
    WriteConflict(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl SteleError {
    /// Whether a caller may safely retry the whole operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SteleError::WriteConflict(_))
    }
}

/// Error code structure for API responses
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

pub const SUCCESS: ErrorCode<'static> = ErrorCode {
    code: 0,
    message: "success",
};

pub const PARAMETER_MISSING: ErrorCode<'static> = ErrorCode {
    code: 10000,
    message: "parameter missing",
};

pub const DATA_ACCESS_ERROR: ErrorCode<'static> = ErrorCode {
    code: 10002,
    message: "data access error",
};

pub const PARAMETER_VALIDATE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 20002,
    message: "parameter validate error",
};

pub const RESOURCE_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 20004,
    message: "resource not found",
};

pub const RESOURCE_CONFLICT: ErrorCode<'static> = ErrorCode {
    code: 20005,
    message: "resource conflict",
};

pub const METADATA_ILLEGAL: ErrorCode<'static> = ErrorCode {
    code: 20006,
    message: "metadata does not match the declared schema",
};

pub const SERVER_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30000,
    message: "server error",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stele_error_display() {
        let err = SteleError::IllegalArgument("invalid config ID".to_string());
        assert_eq!(format!("{}", err), "caused: invalid config ID");

        let err = SteleError::NotFound("config".to_string());
        assert_eq!(format!("{}", err), "config not found");

        let err = SteleError::DatabaseError("connection reset".to_string());
        assert_eq!(format!("{}", err), "database error: connection reset");

        let err = SteleError::WriteConflict("serialization failure".to_string());
        assert_eq!(format!("{}", err), "write conflict: serialization failure");
    }

    #[test]
    fn test_schema_validation_display_carries_details() {
        let outcome = ValidationOutcome::invalid(vec![
            "missing required field 'host'".to_string(),
            "field 'port' must be a number".to_string(),
        ]);
        let err = SteleError::SchemaValidation(outcome);
        let rendered = format!("{}", err);
        assert!(rendered.contains("missing required field 'host'"));
        assert!(rendered.contains("field 'port' must be a number"));
    }

    #[test]
    fn test_retryable() {
        assert!(SteleError::WriteConflict("aborted".to_string()).is_retryable());
        assert!(!SteleError::AlreadyExists.is_retryable());
        assert!(!SteleError::NotFound("config".to_string()).is_retryable());
    }

    #[test]
    fn test_error_code_constants() {
        assert_eq!(SUCCESS.code, 0);
        assert_eq!(SUCCESS.message, "success");
        assert_eq!(PARAMETER_MISSING.code, 10000);
        assert_eq!(RESOURCE_NOT_FOUND.code, 20004);
        assert_eq!(RESOURCE_CONFLICT.code, 20005);
        assert_eq!(SERVER_ERROR.code, 30000);
    }
}

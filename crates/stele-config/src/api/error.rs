//! HTTP error handling
//!
//! Wraps `anyhow::Error` so service errors can flow out of handlers with
//! `?` and still map to the right status and error code. (Cannot impl
//! the foreign `ResponseError` trait for `anyhow::Error` directly due to
//! orphan rules.)

use std::fmt::{Display, Formatter};

use actix_web::HttpResponse;

use stele_common::SteleError;
use stele_common::error::{
    DATA_ACCESS_ERROR, METADATA_ILLEGAL, PARAMETER_VALIDATE_ERROR, RESOURCE_CONFLICT,
    RESOURCE_NOT_FOUND, SERVER_ERROR,
};

use super::response::Result;

#[derive(Debug)]
pub struct AppError {
    inner: anyhow::Error,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        AppError { inner: value }
    }
}

impl AppError {
    pub fn inner(&self) -> &anyhow::Error {
        &self.inner
    }

    pub fn downcast_ref<E: std::error::Error + Send + Sync + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }
}

impl actix_web::error::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        if let Some(e) = self.downcast_ref::<SteleError>() {
            match e {
                SteleError::IllegalArgument(_) => Result::<String>::http_response(
                    400,
                    PARAMETER_VALIDATE_ERROR.code,
                    e.to_string(),
                    String::new(),
                ),
                SteleError::SchemaValidation(_) => Result::<String>::http_response(
                    400,
                    METADATA_ILLEGAL.code,
                    e.to_string(),
                    String::new(),
                ),
                SteleError::AlreadyExists => Result::<String>::http_response(
                    400,
                    RESOURCE_CONFLICT.code,
                    e.to_string(),
                    String::new(),
                ),
                SteleError::NotFound(_) => Result::<String>::http_response(
                    404,
                    RESOURCE_NOT_FOUND.code,
                    e.to_string(),
                    String::new(),
                ),
                SteleError::WriteConflict(_) => Result::<String>::http_response(
                    409,
                    RESOURCE_CONFLICT.code,
                    e.to_string(),
                    String::new(),
                ),
                SteleError::DatabaseError(_) => Result::<String>::http_response(
                    500,
                    DATA_ACCESS_ERROR.code,
                    e.to_string(),
                    String::new(),
                ),
                SteleError::InternalError(_) => Result::<String>::http_response(
                    500,
                    SERVER_ERROR.code,
                    e.to_string(),
                    String::new(),
                ),
            }
        } else {
            Result::<String>::http_response(
                500,
                SERVER_ERROR.code,
                self.inner.to_string(),
                String::new(),
            )
        }
    }
}

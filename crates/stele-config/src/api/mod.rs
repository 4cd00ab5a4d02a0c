//! HTTP API for configuration records

pub mod config;
pub mod context;
pub mod error;
pub mod response;

use actix_web::{Scope, web};

pub use context::RequestIdentity;
pub use error::AppError;

/// All config routes under `/v1/configs`
pub fn routes() -> Scope {
    web::scope("/v1/configs")
        .service(config::create_config)
        .service(config::list_configs)
        .service(config::list_config_archives)
        .service(config::get_config)
        .service(config::update_config)
        .service(config::delete_config)
}

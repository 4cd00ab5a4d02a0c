//! Config API handlers
//!
//! - POST   /v1/configs                create a config
//! - GET    /v1/configs                list configs with filters
//! - GET    /v1/configs/{id}           fetch one config
//! - PUT    /v1/configs/{id}           update mutable fields
//! - DELETE /v1/configs/{id}           delete config and archives
//! - GET    /v1/configs/{id}/archives  list the archive log

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::model::{
    AppState, ArchiveListResponse, ArchiveResponse, ConfigListResponse, ConfigQueryParam,
    ConfigResponse, CreateConfigParam, UpdateConfigParam,
};

use super::context::RequestIdentity;
use super::error::AppError;
use super::response::Result;

#[post("")]
pub async fn create_config(
    data: web::Data<AppState>,
    identity: RequestIdentity,
    param: web::Json<CreateConfigParam>,
) -> std::result::Result<HttpResponse, AppError> {
    let created = data
        .config_service()
        .create(&identity.0, param.into_inner())
        .await?;

    Ok(Result::<ConfigResponse>::http_created(ConfigResponse::from(created)))
}

#[get("")]
pub async fn list_configs(
    data: web::Data<AppState>,
    identity: RequestIdentity,
    param: web::Query<ConfigQueryParam>,
) -> std::result::Result<HttpResponse, AppError> {
    let page = data
        .config_service()
        .list(&identity.0, param.into_inner())
        .await?;

    let body = ConfigListResponse {
        total: page.total_count,
        limit: page.limit,
        skip: page.skip,
        configs: page.page_items.into_iter().map(ConfigResponse::from).collect(),
    };

    Ok(Result::<ConfigListResponse>::http_success(body))
}

#[get("/{id}")]
pub async fn get_config(
    data: web::Data<AppState>,
    identity: RequestIdentity,
    path: web::Path<String>,
) -> std::result::Result<HttpResponse, AppError> {
    let config = data.config_service().get(&identity.0, &path).await?;

    Ok(Result::<ConfigResponse>::http_success(ConfigResponse::from(config)))
}

#[put("/{id}")]
pub async fn update_config(
    data: web::Data<AppState>,
    identity: RequestIdentity,
    path: web::Path<String>,
    param: web::Json<UpdateConfigParam>,
) -> std::result::Result<HttpResponse, AppError> {
    let updated = data
        .config_service()
        .update(&identity.0, &path, param.into_inner())
        .await?;

    Ok(Result::<ConfigResponse>::http_success(ConfigResponse::from(updated)))
}

#[delete("/{id}")]
pub async fn delete_config(
    data: web::Data<AppState>,
    identity: RequestIdentity,
    path: web::Path<String>,
) -> std::result::Result<HttpResponse, AppError> {
    data.config_service().delete(&identity.0, &path).await?;

    Ok(Result::<String>::http_success(String::new()))
}

#[get("/{id}/archives")]
pub async fn list_config_archives(
    data: web::Data<AppState>,
    identity: RequestIdentity,
    path: web::Path<String>,
) -> std::result::Result<HttpResponse, AppError> {
    let archives = data
        .config_service()
        .list_archives(&identity.0, &path)
        .await?;

    let body = ArchiveListResponse {
        total: archives.len() as u64,
        archives: archives.into_iter().map(ArchiveResponse::from).collect(),
    };

    Ok(Result::<ArchiveListResponse>::http_success(body))
}

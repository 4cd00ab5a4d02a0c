//! Main entry point for the Stele configuration service.
//!
//! Wires the selected persistence backend, the schema registry and the
//! HTTP API together and runs the server.

mod config;

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use stele_config::{AppState, api};
use stele_persistence::{
    MemoryPersistService, PersistenceService, SqlPersistService, StorageMode,
};

use crate::config::Configuration;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let configuration = Configuration::new();
    init_tracing();

    let storage_mode = configuration.storage_mode();
    info!("storage mode: {}", storage_mode);

    let persistence: Arc<dyn PersistenceService> = match storage_mode {
        StorageMode::ExternalDb => {
            let db = configuration.database_connection().await?;
            Arc::new(SqlPersistService::new(db))
        }
        StorageMode::Memory => Arc::new(MemoryPersistService::new()),
    };
    persistence.health_check().await?;

    let registry = Arc::new(configuration.schema_registry()?);
    let app_state = AppState::new(persistence, registry);

    let address = configuration.server_address();
    let port = configuration.server_port();
    info!("starting Stele server on {}:{}", address, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Compress::default())
            .service(api::routes())
    })
    .bind((address.as_str(), port))?
    .run()
    .await?;

    info!("Stele server shutdown complete");
    Ok(())
}

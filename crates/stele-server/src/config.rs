//! Configuration management for the Stele server
//!
//! Settings are layered: `conf/stele.toml` (optional), environment
//! variables with the `STELE` prefix, then command line overrides.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use config::{Config, Environment};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use stele_persistence::StorageMode;
use stele_registry::SchemaRegistry;

const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_SCHEMA_FILE: &str = "conf/schema.toml";

/// Command line arguments for the server
#[derive(Debug, Parser)]
#[command()]
struct Cli {
    #[arg(short = 'm', long = "mode")]
    mode: Option<String>,
    #[arg(long = "db-url", env = "DATABASE_URL")]
    database_url: Option<String>,
    #[arg(short = 'a', long = "address")]
    address: Option<String>,
    #[arg(short = 'p', long = "port")]
    port: Option<u16>,
    #[arg(long = "schema-file")]
    schema_file: Option<String>,
}

/// Application configuration loaded from config file, environment and
/// command line
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new() -> Self {
        let args = Cli::parse();
        let mut config_builder = Config::builder()
            .add_source(
                Environment::with_prefix("stele")
                    .separator(".")
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("conf/stele").required(false));

        if let Some(v) = args.mode {
            config_builder = config_builder
                .set_override("storage.mode", v)
                .expect("Failed to set storage mode override");
        }
        if let Some(v) = args.database_url {
            config_builder = config_builder
                .set_override("db.url", v)
                .expect("Failed to set database URL override");
        }
        if let Some(v) = args.address {
            config_builder = config_builder
                .set_override("server.address", v)
                .expect("Failed to set server address override");
        }
        if let Some(v) = args.port {
            config_builder = config_builder
                .set_override("server.port", v)
                .expect("Failed to set server port override");
        }
        if let Some(v) = args.schema_file {
            config_builder = config_builder
                .set_override("schema.file", v)
                .expect("Failed to set schema file override");
        }

        let app_config = config_builder
            .build()
            .expect("Failed to build configuration");

        Configuration { config: app_config }
    }

    pub fn server_address(&self) -> String {
        self.config
            .get_string("server.address")
            .unwrap_or("0.0.0.0".to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int("server.port")
            .unwrap_or(DEFAULT_SERVER_PORT.into()) as u16
    }

    /// Storage backend selection; anything other than "memory" means the
    /// external database.
    pub fn storage_mode(&self) -> StorageMode {
        match self.config.get_string("storage.mode").as_deref() {
            Ok("memory") => StorageMode::Memory,
            _ => StorageMode::ExternalDb,
        }
    }

    pub async fn database_connection(&self) -> anyhow::Result<DatabaseConnection> {
        let url = self
            .config
            .get_string("db.url")
            .map_err(|_| anyhow::anyhow!("db.url is required for external-db storage"))?;

        let mut options = ConnectOptions::new(url);
        options
            .max_connections(self.config.get_int("db.max_connections").unwrap_or(20) as u32)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(self.config.get_bool("db.log").unwrap_or(false));

        Ok(Database::connect(options).await?)
    }

    pub fn schema_file(&self) -> String {
        self.config
            .get_string("schema.file")
            .unwrap_or(DEFAULT_SCHEMA_FILE.to_string())
    }

    /// Load and build the type schema registry from its TOML definition
    /// file.
    pub fn schema_registry(&self) -> anyhow::Result<SchemaRegistry> {
        let path = self.schema_file();
        let doc = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read schema file '{}'", path))?;

        SchemaRegistry::from_toml_str(&doc)
            .with_context(|| format!("invalid schema file '{}'", path))
    }
}

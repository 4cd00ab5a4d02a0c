pub mod config;

pub use config::ConfigService;

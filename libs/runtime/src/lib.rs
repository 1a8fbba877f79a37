pub mod config;
pub mod logging;

pub use config::{
    default_logging_config, AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Profile, Section,
    ServerConfig, MEMORY_DSN,
};

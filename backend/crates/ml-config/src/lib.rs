mod admin_config;
mod broadcast_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod rate_limit_config;
mod server_config;
mod transport_config;

pub use admin_config::AdminConfig;
pub use broadcast_config::BroadcastConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use rate_limit_config::RateLimitConfig;
pub use server_config::ServerConfig;
pub use transport_config::{TransportConfig, TransportKind};

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "ML_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".ml";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 7171;
const MIN_PORT: u16 = 1024;

const DEFAULT_DATABASE_FILENAME: &str = "mailer.db";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

const DEFAULT_ADMIN_USER: &str = "admin";

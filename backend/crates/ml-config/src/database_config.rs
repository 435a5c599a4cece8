use crate::{ConfigError, ConfigErrorResult, DEFAULT_DATABASE_FILENAME};

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

pub const MIN_DB_CONNECTIONS: u32 = 1;
pub const MAX_DB_CONNECTIONS: u32 = 64;
pub const DEFAULT_DB_CONNECTIONS: u32 = 10;
pub const DEFAULT_DB_BUSY_TIMEOUT_SECS: u64 = 5;
pub const MAX_DB_BUSY_TIMEOUT_SECS: u64 = 60;

/// SQLite file holding lists and subscriptions, relative to the config dir
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_connections: u32,
    /// How long a writer waits on a locked database
    pub busy_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: String::from(DEFAULT_DATABASE_FILENAME),
            max_connections: DEFAULT_DB_CONNECTIONS,
            busy_timeout_secs: DEFAULT_DB_BUSY_TIMEOUT_SECS,
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::database("database.path cannot be empty"));
        }

        if Path::new(&self.path).is_absolute() || self.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        if !(MIN_DB_CONNECTIONS..=MAX_DB_CONNECTIONS).contains(&self.max_connections) {
            return Err(ConfigError::database(format!(
                "database.max_connections must be {MIN_DB_CONNECTIONS}-{MAX_DB_CONNECTIONS}, got {}",
                self.max_connections
            )));
        }

        if self.busy_timeout_secs > MAX_DB_BUSY_TIMEOUT_SECS {
            return Err(ConfigError::database(format!(
                "database.busy_timeout_secs must be at most {MAX_DB_BUSY_TIMEOUT_SECS}, got {}",
                self.busy_timeout_secs
            )));
        }

        Ok(())
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }
}

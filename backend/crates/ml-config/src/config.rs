use crate::{
    AdminConfig, BroadcastConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError,
    ConfigErrorResult, DEFAULT_CONFIG_DIR, DatabaseConfig, LoggingConfig, RateLimitConfig,
    ServerConfig, TransportConfig, TransportKind,
};

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub admin: AdminConfig,
    pub broadcast: BroadcastConfig,
    pub rate_limit: RateLimitConfig,
    pub transport: TransportConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for ML_CONFIG_DIR env var, else use ./.ml/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply ML_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: ML_CONFIG_DIR env var > ./.ml/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.admin.validate()?;
        self.broadcast.validate()?;
        self.rate_limit.validate()?;
        self.transport.validate()?;
        self.database.validate()?;

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (public url: {})",
            self.server.host,
            self.server.port,
            self.server.public_url.as_deref().unwrap_or("from request")
        );
        info!(
            "  database: {} (max_connections={}, busy_timeout={}s)",
            self.database.path, self.database.max_connections, self.database.busy_timeout_secs
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        info!("  admin: user={}", self.admin.username);
        if self.admin.is_using_default_password() {
            warn!("  admin: running with the DEFAULT password");
        }
        info!(
            "  broadcast: domain={}, sender_prefix={}, grace={}s",
            self.broadcast.outbound_domain().unwrap_or("<unset>"),
            self.broadcast.sender_prefix,
            self.broadcast.grace_period_secs
        );
        if self.broadcast.outbound_domain().is_none() {
            warn!("  broadcast: outbound_domain is not set, broadcasts will be refused");
        }
        info!(
            "  rate_limit: {}/s (burst {})",
            self.rate_limit.sends_per_second, self.rate_limit.burst
        );
        info!(
            "  transport: {} (endpoint: {}, api key: {}, timeout={}s)",
            self.transport.kind.as_str(),
            self.transport.endpoint.as_deref().unwrap_or("-"),
            if self.transport.api_key.is_some() {
                "set"
            } else {
                "unset"
            },
            self.transport.timeout_secs
        );
        if self.transport.kind == TransportKind::Smtp {
            info!(
                "  smtp: {}:{} as {} (password: {})",
                self.transport.smtp_host.as_deref().unwrap_or("-"),
                self.transport.smtp_port,
                self.transport.smtp_user.as_deref().unwrap_or("-"),
                if self.transport.smtp_pass.is_some() {
                    "set"
                } else {
                    "unset"
                }
            );
        }
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("ML_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("ML_SERVER_PORT", &mut self.server.port);
        Self::apply_env_option_string("ML_SERVER_PUBLIC_URL", &mut self.server.public_url);

        // Database
        Self::apply_env_string("ML_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "ML_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Logging
        Self::apply_env_parse("ML_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("ML_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("ML_LOG_FILE", &mut self.logging.file);

        // Admin
        Self::apply_env_string("ML_ADMIN_USER", &mut self.admin.username);
        Self::apply_env_option_string("ML_ADMIN_PASS", &mut self.admin.password);
        Self::apply_env_bool(
            "ML_ADMIN_ALLOW_DEFAULT_PASSWORD",
            &mut self.admin.allow_default_password,
        );

        // Broadcast
        Self::apply_env_option_string(
            "ML_OUTBOUND_DOMAIN",
            &mut self.broadcast.outbound_domain,
        );
        Self::apply_env_string("ML_SENDER_PREFIX", &mut self.broadcast.sender_prefix);
        Self::apply_env_parse(
            "ML_GRACE_PERIOD_SECS",
            &mut self.broadcast.grace_period_secs,
        );

        // Rate limit
        Self::apply_env_parse(
            "ML_RATE_LIMIT_SENDS_PER_SECOND",
            &mut self.rate_limit.sends_per_second,
        );
        Self::apply_env_parse("ML_RATE_LIMIT_BURST", &mut self.rate_limit.burst);

        // Transport
        Self::apply_env_parse("ML_TRANSPORT_KIND", &mut self.transport.kind);
        Self::apply_env_option_string("ML_TRANSPORT_ENDPOINT", &mut self.transport.endpoint);
        Self::apply_env_option_string("ML_TRANSPORT_API_KEY", &mut self.transport.api_key);
        Self::apply_env_parse(
            "ML_TRANSPORT_TIMEOUT_SECS",
            &mut self.transport.timeout_secs,
        );
        Self::apply_env_option_string("ML_SMTP_HOST", &mut self.transport.smtp_host);
        Self::apply_env_parse("ML_SMTP_PORT", &mut self.transport.smtp_port);
        Self::apply_env_option_string("ML_SMTP_USER", &mut self.transport.smtp_user);
        Self::apply_env_option_string("ML_SMTP_PASS", &mut self.transport.smtp_pass);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}

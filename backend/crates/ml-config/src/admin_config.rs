use crate::{ConfigError, ConfigErrorResult, DEFAULT_ADMIN_USER};

use serde::Deserialize;

/// Password used when `allow_default_password` is set and none is configured.
pub const DEFAULT_ADMIN_PASSWORD: &str = "password";

/// Credentials guarding the `/admin` routes (HTTP basic auth).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: Option<String>,
    /// Development escape hatch: run with the well-known default password
    pub allow_default_password: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: String::from(DEFAULT_ADMIN_USER),
            password: None,
            allow_default_password: false,
        }
    }
}

impl AdminConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::admin("admin.username cannot be empty"));
        }

        match self.password {
            Some(ref password) if password.is_empty() => {
                Err(ConfigError::admin("admin.password cannot be empty"))
            }
            None if !self.allow_default_password => Err(ConfigError::admin(
                "admin.password is required (set ML_ADMIN_PASS, or \
                 admin.allow_default_password = true for development)",
            )),
            _ => Ok(()),
        }
    }

    /// Password the server should accept
    pub fn effective_password(&self) -> &str {
        self.password.as_deref().unwrap_or(DEFAULT_ADMIN_PASSWORD)
    }

    pub fn is_using_default_password(&self) -> bool {
        self.password.is_none()
    }
}

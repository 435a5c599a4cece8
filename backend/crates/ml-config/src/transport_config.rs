use crate::{ConfigError, ConfigErrorResult};

use std::str::FromStr;

use serde::Deserialize;

pub const MIN_TRANSPORT_TIMEOUT_SECS: u64 = 1;
pub const MAX_TRANSPORT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_TRANSPORT_TIMEOUT_SECS: u64 = 10;
/// SMTP over implicit TLS
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// Which mail transport delivers individual messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Log each message instead of delivering it
    #[default]
    Log,
    /// POST each message as JSON to a mail provider's HTTP API
    Http,
    /// Deliver through an SMTP relay over implicit TLS
    Smtp,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Http => "http",
            Self::Smtp => "smtp",
        }
    }
}

impl FromStr for TransportKind {
    type Err = ConfigError;

    #[track_caller]
    fn from_str(s: &str) -> ConfigErrorResult<Self> {
        match s.to_lowercase().as_str() {
            "log" => Ok(Self::Log),
            "http" => Ok(Self::Http),
            "smtp" => Ok(Self::Smtp),
            other => Err(ConfigError::transport(format!(
                "transport.kind must be 'log', 'http' or 'smtp', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub kind: TransportKind,
    pub endpoint: Option<String>,
    /// Bearer token for the provider API. Never logged.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    /// Never logged
    pub smtp_pass: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            kind: TransportKind::Log,
            endpoint: None,
            api_key: None,
            timeout_secs: DEFAULT_TRANSPORT_TIMEOUT_SECS,
            smtp_host: None,
            smtp_port: DEFAULT_SMTP_PORT,
            smtp_user: None,
            smtp_pass: None,
        }
    }
}

impl TransportConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.kind == TransportKind::Http {
            match self.endpoint.as_deref() {
                None | Some("") => {
                    return Err(ConfigError::transport(
                        "transport.endpoint is required when transport.kind = 'http'",
                    ));
                }
                Some(endpoint)
                    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) =>
                {
                    return Err(ConfigError::transport(format!(
                        "transport.endpoint must be an http(s) URL, got {endpoint}"
                    )));
                }
                Some(_) => {}
            }
        }

        if self.kind == TransportKind::Smtp {
            for (key, value) in [
                ("transport.smtp_host", &self.smtp_host),
                ("transport.smtp_user", &self.smtp_user),
                ("transport.smtp_pass", &self.smtp_pass),
            ] {
                if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                    return Err(ConfigError::transport(format!(
                        "{key} is required when transport.kind = 'smtp'"
                    )));
                }
            }
            if self.smtp_port == 0 {
                return Err(ConfigError::transport("transport.smtp_port must not be 0"));
            }
        }

        if self.timeout_secs < MIN_TRANSPORT_TIMEOUT_SECS
            || self.timeout_secs > MAX_TRANSPORT_TIMEOUT_SECS
        {
            return Err(ConfigError::transport(format!(
                "transport.timeout_secs must be {}-{}, got {}",
                MIN_TRANSPORT_TIMEOUT_SECS, MAX_TRANSPORT_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        Ok(())
    }
}

use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_SENDER_PREFIX: &str = "mailer";

pub const MIN_GRACE_PERIOD_SECS: u64 = 0;
pub const MAX_GRACE_PERIOD_SECS: u64 = 3600;
pub const DEFAULT_GRACE_PERIOD_SECS: u64 = 30;

/// Broadcast dispatch settings.
///
/// `outbound_domain` is deliberately not checked by `validate()`: a missing
/// domain only blocks broadcasts, and is reported to the request that asks
/// for one.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BroadcastConfig {
    pub outbound_domain: Option<String>,
    pub sender_prefix: String,
    /// Delay between enqueue and first send, during which the blast can be cancelled
    pub grace_period_secs: u64,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            outbound_domain: None,
            sender_prefix: String::from(DEFAULT_SENDER_PREFIX),
            grace_period_secs: DEFAULT_GRACE_PERIOD_SECS,
        }
    }
}

impl BroadcastConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.sender_prefix.trim().is_empty() || self.sender_prefix.contains('@') {
            return Err(ConfigError::broadcast(format!(
                "broadcast.sender_prefix must be non-empty and contain no '@', got '{}'",
                self.sender_prefix
            )));
        }

        if self.grace_period_secs > MAX_GRACE_PERIOD_SECS {
            return Err(ConfigError::broadcast(format!(
                "broadcast.grace_period_secs must be {}-{}, got {}",
                MIN_GRACE_PERIOD_SECS, MAX_GRACE_PERIOD_SECS, self.grace_period_secs
            )));
        }

        Ok(())
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_secs)
    }

    /// Outbound domain with empty strings treated as missing
    pub fn outbound_domain(&self) -> Option<&str> {
        self.outbound_domain
            .as_deref()
            .map(str::trim)
            .filter(|domain| !domain.is_empty())
    }
}

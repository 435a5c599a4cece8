use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Outbound send rate constraints
pub const MIN_SENDS_PER_SECOND: u32 = 1;
pub const MAX_SENDS_PER_SECOND: u32 = 1000;
pub const DEFAULT_SENDS_PER_SECOND: u32 = 1;

pub const MIN_BURST: u32 = 1;
pub const MAX_BURST: u32 = 1000;
pub const DEFAULT_BURST: u32 = 1;

/// Global outbound mail rate, shared by every running broadcast.
/// Defaults match a typical provider cap of one message per second.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub sends_per_second: u32,
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            sends_per_second: DEFAULT_SENDS_PER_SECOND,
            burst: DEFAULT_BURST,
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.sends_per_second < MIN_SENDS_PER_SECOND
            || self.sends_per_second > MAX_SENDS_PER_SECOND
        {
            return Err(ConfigError::config(format!(
                "rate_limit.sends_per_second must be {}-{}, got {}",
                MIN_SENDS_PER_SECOND, MAX_SENDS_PER_SECOND, self.sends_per_second
            )));
        }

        if self.burst < MIN_BURST || self.burst > MAX_BURST {
            return Err(ConfigError::config(format!(
                "rate_limit.burst must be {}-{}, got {}",
                MIN_BURST, MAX_BURST, self.burst
            )));
        }

        Ok(())
    }
}

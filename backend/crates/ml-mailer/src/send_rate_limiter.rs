use crate::{MailerError, Result as MailerResult};

use std::num::NonZeroU32;
use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use tokio_util::sync::CancellationToken;

/// Process-wide pacing for outbound sends.
///
/// One instance is shared by every broadcast, so the configured rate bounds
/// the total send rate regardless of how many lists are broadcasting.
pub struct SendRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    interval: Duration,
    burst: NonZeroU32,
}

impl SendRateLimiter {
    /// Allow `sends_per_second`, with up to `burst` permits available at once
    pub fn per_second(sends_per_second: NonZeroU32, burst: NonZeroU32) -> Self {
        let quota = Quota::per_second(sends_per_second).allow_burst(burst);
        Self {
            limiter: RateLimiter::direct(quota),
            interval: quota.replenish_interval(),
            burst,
        }
    }

    /// One permit every `interval`, with up to `burst` available at once
    #[track_caller]
    pub fn with_interval(interval: Duration, burst: NonZeroU32) -> MailerResult<Self> {
        let quota = Quota::with_period(interval)
            .ok_or_else(|| MailerError::InvalidRateLimit {
                message: "send interval must be greater than zero".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?
            .allow_burst(burst);

        Ok(Self {
            limiter: RateLimiter::direct(quota),
            interval,
            burst,
        })
    }

    /// Wait until a send permit is available
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }

    /// Take a permit if one is available right now
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }

    /// Wait for a permit, giving up after `timeout`
    pub async fn acquire_timeout(&self, timeout: Duration) -> MailerResult<()> {
        tokio::time::timeout(timeout, self.acquire())
            .await
            .map_err(|_| MailerError::RateLimitTimeout {
                waited_ms: timeout.as_millis(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Wait for a permit unless `token` is cancelled first
    pub async fn acquire_until_cancelled(&self, token: &CancellationToken) -> MailerResult<()> {
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(MailerError::PermitWaitCancelled {
                location: ErrorLocation::from(Location::caller()),
            }),
            _ = self.acquire() => Ok(()),
        }
    }

    /// Minimum spacing between permits once the burst is spent
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn burst(&self) -> NonZeroU32 {
        self.burst
    }
}

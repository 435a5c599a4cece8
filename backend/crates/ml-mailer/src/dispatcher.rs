use crate::{
    BroadcastHandle, BroadcastMetrics, BroadcastOutcome, CancellationRegistry, MailTransport,
    MailerError, OutboundMessage, Result as MailerResult, SendRateLimiter,
};

use std::panic::Location;
use std::sync::Arc;
use std::time::{Duration, Instant};

use error_location::ErrorLocation;
use log::{error, info, warn};
use ml_core::BroadcastJob;
use reqwest::Url;
use tokio::task::JoinHandle;

/// Static settings shared by every broadcast
#[derive(Debug, Clone)]
pub struct DispatcherSettings {
    /// Domain used for sender addresses; broadcasts are refused without one
    pub outbound_domain: Option<String>,
    pub sender_prefix: String,
    /// How long a broadcast waits before sending, during which it can be cancelled
    pub grace_period: Duration,
}

/// Accepts broadcast jobs and runs each on its own background task.
///
/// Every task shares the same [`CancellationRegistry`] and
/// [`SendRateLimiter`].
#[derive(Clone)]
pub struct BroadcastDispatcher {
    registry: CancellationRegistry,
    limiter: Arc<SendRateLimiter>,
    transport: Arc<dyn MailTransport>,
    settings: Arc<DispatcherSettings>,
    metrics: BroadcastMetrics,
}

impl BroadcastDispatcher {
    pub fn new(
        registry: CancellationRegistry,
        limiter: Arc<SendRateLimiter>,
        transport: Arc<dyn MailTransport>,
        settings: DispatcherSettings,
    ) -> Self {
        Self {
            registry,
            limiter,
            transport,
            settings: Arc::new(settings),
            metrics: BroadcastMetrics::new(),
        }
    }

    pub fn registry(&self) -> &CancellationRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &DispatcherSettings {
        &self.settings
    }

    /// Accept `job` and start its grace period in the background.
    ///
    /// Configuration problems and a broadcast already in progress for the
    /// same list are reported here, before anything is spawned. Everything
    /// after acceptance is reported through logs and the returned task's
    /// [`BroadcastOutcome`].
    #[track_caller]
    pub fn dispatch(&self, job: BroadcastJob) -> MailerResult<JoinHandle<BroadcastOutcome>> {
        let caller = Location::caller();

        let Some(domain) = self
            .settings
            .outbound_domain
            .as_deref()
            .filter(|d| !d.trim().is_empty())
        else {
            self.metrics.broadcast_rejected("missing_domain");
            return Err(MailerError::MissingOutboundDomain {
                location: ErrorLocation::from(caller),
            });
        };

        if let Err(e) = Url::parse(job.web_root()) {
            self.metrics.broadcast_rejected("invalid_web_root");
            return Err(MailerError::InvalidWebRoot {
                web_root: job.web_root().to_string(),
                message: e.to_string(),
                location: ErrorLocation::from(caller),
            });
        }

        let handle = self.registry.claim(job.list_name()).inspect_err(|_| {
            self.metrics.broadcast_rejected("in_progress");
        })?;

        let sender = job.sender_address(&self.settings.sender_prefix, domain);
        info!(
            "Accepted broadcast '{}' to list '{}' ({} recipients), sending in {:?}",
            job.subject(),
            job.list_name(),
            job.recipient_count(),
            self.settings.grace_period
        );
        self.metrics.broadcast_accepted(job.recipient_count());

        let task = BroadcastTask {
            registry: self.registry.clone(),
            limiter: Arc::clone(&self.limiter),
            transport: Arc::clone(&self.transport),
            metrics: self.metrics.clone(),
            grace_period: self.settings.grace_period,
            sender,
            handle,
            job,
        };

        Ok(tokio::spawn(task.run()))
    }
}

struct BroadcastTask {
    registry: CancellationRegistry,
    limiter: Arc<SendRateLimiter>,
    transport: Arc<dyn MailTransport>,
    metrics: BroadcastMetrics,
    grace_period: Duration,
    sender: String,
    handle: BroadcastHandle,
    job: BroadcastJob,
}

impl BroadcastTask {
    async fn run(self) -> BroadcastOutcome {
        // Cancellation wins a tie with the timer.
        tokio::select! {
            biased;
            _ = self.handle.cancelled() => {
                info!(
                    "Broadcast to list '{}' cancelled during grace period",
                    self.job.list_name()
                );
                self.metrics.broadcast_cancelled();
                return BroadcastOutcome::Cancelled;
            }
            _ = tokio::time::sleep(self.grace_period) => {}
        }

        // A cancel can land between the timer firing and this point.
        let Some(_sending) = self
            .registry
            .begin_sending(self.job.list_name(), &self.handle)
        else {
            info!(
                "Broadcast to list '{}' cancelled as its grace period ended",
                self.job.list_name()
            );
            self.metrics.broadcast_cancelled();
            return BroadcastOutcome::Cancelled;
        };
        self.metrics.sending_started();

        let outcome = self.send_all().await;

        self.metrics.sending_finished();
        outcome
    }

    async fn send_all(&self) -> BroadcastOutcome {
        let list_name = self.job.list_name();
        let subscribers = self.job.subscribers();
        info!(
            "Sending broadcast to list '{list_name}' ({} recipients) via {} transport",
            subscribers.len(),
            self.transport.name()
        );

        let mut succeeded = 0;
        let mut failed = 0;

        for subscriber in subscribers {
            self.limiter.acquire().await;

            let started = Instant::now();
            let result = match OutboundMessage::for_subscriber(&self.job, &self.sender, subscriber)
            {
                Ok(message) => self.transport.send(&message).await,
                Err(e) => Err(e),
            };
            self.metrics.send_latency(started.elapsed());

            match result {
                Ok(()) => {
                    info!("Sent broadcast for list '{list_name}' to {}", subscriber.email);
                    self.metrics.send_succeeded();
                    succeeded += 1;
                }
                Err(e) => {
                    error!(
                        "Failed to send broadcast for list '{list_name}' to {}: {e}",
                        subscriber.email
                    );
                    self.metrics.send_failed();
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            warn!(
                "Broadcast to list '{list_name}' finished with {failed} of {} sends failed",
                subscribers.len()
            );
        } else {
            info!(
                "Broadcast to list '{list_name}' finished, {succeeded} messages sent"
            );
        }

        BroadcastOutcome::Completed {
            attempted: subscribers.len(),
            succeeded,
            failed,
        }
    }
}

impl Drop for BroadcastTask {
    fn drop(&mut self) {
        // Aborted or shut down before sending started.
        if self.registry.release(self.job.list_name(), &self.handle) {
            warn!(
                "Broadcast to list '{}' was dropped during its grace period",
                self.job.list_name()
            );
        }
    }
}

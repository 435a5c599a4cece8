use std::time::Duration;

use metrics::{counter, gauge, histogram};

/// Metrics collector for broadcast dispatch
#[derive(Clone)]
pub struct BroadcastMetrics {
    prefix: &'static str,
}

impl BroadcastMetrics {
    pub fn new() -> Self {
        Self { prefix: "ml_mailer" }
    }

    /// Record a broadcast accepted into its grace period
    pub fn broadcast_accepted(&self, recipients: usize) {
        counter!(format!("{}.broadcasts.accepted", self.prefix)).increment(1);
        histogram!(format!("{}.broadcasts.recipients", self.prefix)).record(recipients as f64);
    }

    /// Record a broadcast refused before it was accepted
    pub fn broadcast_rejected(&self, reason: &str) {
        counter!(format!("{}.broadcasts.rejected", self.prefix)).increment(1);
        counter!(format!("{}.broadcasts.rejected.{}", self.prefix, reason)).increment(1);
    }

    pub fn broadcast_cancelled(&self) {
        counter!(format!("{}.broadcasts.cancelled", self.prefix)).increment(1);
    }

    pub fn sending_started(&self) {
        gauge!(format!("{}.broadcasts.sending", self.prefix)).increment(1.0);
    }

    pub fn sending_finished(&self) {
        counter!(format!("{}.broadcasts.completed", self.prefix)).increment(1);
        gauge!(format!("{}.broadcasts.sending", self.prefix)).decrement(1.0);
    }

    pub fn send_succeeded(&self) {
        counter!(format!("{}.sends.succeeded", self.prefix)).increment(1);
    }

    pub fn send_failed(&self) {
        counter!(format!("{}.sends.failed", self.prefix)).increment(1);
    }

    /// Record how long one transport call took
    pub fn send_latency(&self, duration: Duration) {
        histogram!(format!("{}.sends.latency_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }
}

impl Default for BroadcastMetrics {
    fn default() -> Self {
        Self::new()
    }
}

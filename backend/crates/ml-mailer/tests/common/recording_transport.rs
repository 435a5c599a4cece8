use ml_mailer::{MailTransport, MailerError, OutboundMessage, Result as MailerResult};

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct SendAttempt {
    pub message: OutboundMessage,
    pub at: Instant,
    pub succeeded: bool,
}

/// Transport double that records every attempt
pub struct RecordingTransport {
    attempts: Mutex<Vec<SendAttempt>>,
    fail_for: HashSet<String>,
    delay: Option<Duration>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Self::build(&[], None)
    }

    /// Fails every send addressed to one of `recipients`
    pub fn failing_for(recipients: &[&str]) -> Arc<Self> {
        Self::build(recipients, None)
    }

    /// Takes `delay` to complete each send
    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Self::build(&[], Some(delay))
    }

    fn build(fail_for: &[&str], delay: Option<Duration>) -> Arc<Self> {
        Arc::new(Self {
            attempts: Mutex::new(Vec::new()),
            fail_for: fail_for.iter().map(|r| r.to_string()).collect(),
            delay,
        })
    }

    pub fn attempts(&self) -> Vec<SendAttempt> {
        self.attempts.lock().expect("attempts lock").clone()
    }

    pub fn recipients(&self) -> Vec<String> {
        self.attempts()
            .into_iter()
            .map(|a| a.message.to)
            .collect()
    }

    pub fn delivered(&self) -> Vec<String> {
        self.attempts()
            .into_iter()
            .filter(|a| a.succeeded)
            .map(|a| a.message.to)
            .collect()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, message: &OutboundMessage) -> MailerResult<()> {
        let at = Instant::now();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let succeeded = !self.fail_for.contains(&message.to);
        self.attempts
            .lock()
            .expect("attempts lock")
            .push(SendAttempt {
                message: message.clone(),
                at,
                succeeded,
            });

        if succeeded {
            Ok(())
        } else {
            Err(MailerError::send(message.to.clone(), "rejected by test transport"))
        }
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

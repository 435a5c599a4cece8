use crate::{MailTransport, OutboundMessage, Result as MailerResult};

use async_trait::async_trait;
use log::info;

/// Transport that only logs each message. Used for local development.
#[derive(Debug, Default, Clone)]
pub struct LogTransport;

impl LogTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailTransport for LogTransport {
    async fn send(&self, message: &OutboundMessage) -> MailerResult<()> {
        info!(
            "[log transport] {} -> {}: {} ({} bytes, unsubscribe: {})",
            message.from,
            message.to,
            message.subject,
            message.html_body.len(),
            message.unsubscribe_link
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

mod http_api_transport;
mod log_transport;
mod smtp_transport;

pub use http_api_transport::HttpApiTransport;
pub use log_transport::LogTransport;
pub use smtp_transport::{SmtpSettings, SmtpTransport};

pub(crate) use smtp_transport::build_email;

use crate::{OutboundMessage, Result as MailerResult};

use async_trait::async_trait;

/// Delivers a single rendered message.
///
/// Implementations must be safe to call from many broadcast tasks at once.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> MailerResult<()>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

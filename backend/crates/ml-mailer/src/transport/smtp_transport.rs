use crate::{MailTransport, MailerError, OutboundMessage, Result as MailerResult};

use std::panic::Location;
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use lettre::message::Mailbox;
use lettre::message::header::{ContentType, Header, HeaderName, HeaderValue};
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::debug;

/// Connection settings for an SMTP relay that speaks TLS from the first byte
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    /// Never logged
    pub password: String,
    pub timeout: Duration,
}

/// Transport that delivers through an SMTP relay over implicit TLS with
/// PLAIN authentication
pub struct SmtpTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
    port: u16,
}

impl SmtpTransport {
    /// Build the relay client. No connection is opened until the first send.
    #[track_caller]
    pub fn new(settings: SmtpSettings) -> MailerResult<Self> {
        let caller = Location::caller();

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
            .map_err(|e| MailerError::InvalidTransport {
                message: format!("cannot use SMTP relay '{}': {e}", settings.host),
                location: ErrorLocation::from(caller),
            })?
            .port(settings.port)
            .credentials(Credentials::new(settings.username, settings.password))
            .authentication(vec![Mechanism::Plain])
            .timeout(Some(settings.timeout))
            .build();

        Ok(Self {
            mailer,
            host: settings.host,
            port: settings.port,
        })
    }

    pub fn relay(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn send(&self, message: &OutboundMessage) -> MailerResult<()> {
        let email = build_email(message)?;

        let response = self
            .mailer
            .send(email)
            .await
            .map_err(|e| MailerError::smtp(message.to.clone(), e))?;

        debug!(
            "SMTP relay {} accepted message for {} ({})",
            self.relay(),
            message.to,
            response.code()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

/// `List-Unsubscribe: <link>`
#[derive(Debug, Clone)]
struct ListUnsubscribe(String);

impl Header for ListUnsubscribe {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("List-Unsubscribe")
    }

    fn parse(s: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self(
            s.trim().trim_start_matches('<').trim_end_matches('>').to_string(),
        ))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), format!("<{}>", self.0))
    }
}

/// Render `message` as an HTML email with a `List-Unsubscribe` header
#[track_caller]
pub(crate) fn build_email(message: &OutboundMessage) -> MailerResult<Message> {
    let caller = Location::caller();
    let invalid = |what: &str, e: &dyn std::fmt::Display| MailerError::Send {
        recipient: message.to.clone(),
        message: format!("{what}: {e}"),
        location: ErrorLocation::from(caller),
    };

    let from: Mailbox = message
        .from
        .parse()
        .map_err(|e| invalid("invalid sender address", &e))?;
    let to: Mailbox = message
        .to
        .parse()
        .map_err(|e| invalid("invalid recipient address", &e))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .header(ListUnsubscribe(message.unsubscribe_link.clone()))
        .body(message.html_body.clone())
        .map_err(|e| invalid("cannot build message", &e))
}

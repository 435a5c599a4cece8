use crate::{MailTransport, MailerError, OutboundMessage, Result as MailerResult};

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Serialize;

/// Transport that posts each message as JSON to a mail provider endpoint
pub struct HttpApiTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
    headers: SendHeaders,
}

#[derive(Serialize)]
struct SendHeaders {
    #[serde(rename = "List-Unsubscribe")]
    list_unsubscribe: String,
}

impl HttpApiTransport {
    pub fn new(endpoint: String, api_key: Option<String>, timeout: Duration) -> MailerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MailerError::transport(endpoint.clone(), e))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MailTransport for HttpApiTransport {
    async fn send(&self, message: &OutboundMessage) -> MailerResult<()> {
        let payload = SendRequest {
            from: &message.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html_body,
            headers: SendHeaders {
                list_unsubscribe: format!("<{}>", message.unsubscribe_link),
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MailerError::transport(message.to.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailerError::send(
                message.to.clone(),
                format!("provider returned {status}: {}", body.trim()),
            ));
        }

        debug!("Provider accepted message for {} ({status})", message.to);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

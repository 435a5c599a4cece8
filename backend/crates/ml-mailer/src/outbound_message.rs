use crate::{MailerError, Result as MailerResult};

use std::panic::Location;

use error_location::ErrorLocation;
use ml_core::{BroadcastJob, Subscriber, htmlify_body};
use reqwest::Url;
use serde::Serialize;

/// One rendered message for one recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub unsubscribe_link: String,
}

impl OutboundMessage {
    /// Render the job's content for `subscriber`, sent from `from`
    pub fn for_subscriber(
        job: &BroadcastJob,
        from: &str,
        subscriber: &Subscriber,
    ) -> MailerResult<Self> {
        let link = unsubscribe_link(
            job.web_root(),
            job.list_name(),
            &subscriber.email,
            &subscriber.unsub_token,
        )?;

        Ok(Self {
            from: from.to_string(),
            to: subscriber.email.clone(),
            subject: job.subject().to_string(),
            html_body: render_html(job.subject(), job.body(), &link),
            unsubscribe_link: link,
        })
    }
}

/// Build `{web_root}/unsubscribe/{list}/{email}/{token}` with each segment
/// percent-encoded.
#[track_caller]
pub fn unsubscribe_link(
    web_root: &str,
    list_name: &str,
    email: &str,
    token: &str,
) -> MailerResult<String> {
    let caller = Location::caller();
    let invalid = |message: String| MailerError::InvalidWebRoot {
        web_root: web_root.to_string(),
        message,
        location: ErrorLocation::from(caller),
    };

    let mut url = Url::parse(web_root).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("URL cannot carry a path".to_string()))?
        .pop_if_empty()
        .extend(["unsubscribe", list_name, email, token]);

    Ok(url.into())
}

fn render_html(subject: &str, body: &str, unsubscribe_link: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n<hr>\n<p style=\"font-size: small\">You are receiving this because you subscribed to this list. <a href=\"{}\">Unsubscribe</a></p>\n</body>\n</html>\n",
        escape_html(subject),
        htmlify_body(body),
        escape_html(unsubscribe_link),
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

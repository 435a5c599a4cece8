//! Broadcast job - the state captured when an operator requests a blast.
//!
//! A job is never stored. It owns its subscriber snapshot outright, so joins
//! and leaves that happen after the request cannot reach it.

use crate::Subscriber;

/// One requested broadcast of `subject`/`body` to a fixed set of subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastJob {
    list_name: String,
    subject: String,
    body: String,
    subscribers: Vec<Subscriber>,
    /// Scheme + authority used to build unsubscribe links, e.g. `https://lists.example.com`
    web_root: String,
}

impl BroadcastJob {
    pub fn new(
        list_name: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        subscribers: Vec<Subscriber>,
        web_root: impl Into<String>,
    ) -> Self {
        Self {
            list_name: list_name.into(),
            subject: subject.into(),
            body: body.into(),
            subscribers,
            web_root: web_root.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn list_name(&self) -> &str {
        &self.list_name
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Subscribers in the order they were captured
    pub fn subscribers(&self) -> &[Subscriber] {
        &self.subscribers
    }

    pub fn web_root(&self) -> &str {
        &self.web_root
    }

    pub fn recipient_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Sender identity for this list: `{prefix}-{list}@{domain}`
    pub fn sender_address(&self, prefix: &str, outbound_domain: &str) -> String {
        format!("{}-{}@{}", prefix, self.list_name, outbound_domain)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One address subscribed to a list.
///
/// `unsub_token` is the per-subscription secret embedded in unsubscribe links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub email: String,
    pub unsub_token: String,
    pub joined_at: DateTime<Utc>,
}

impl Subscriber {
    pub fn new(email: impl Into<String>, unsub_token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            unsub_token: unsub_token.into(),
            joined_at: Utc::now(),
        }
    }
}

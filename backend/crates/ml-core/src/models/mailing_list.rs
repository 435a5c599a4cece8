//! Mailing list entity - a named group of subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A mailing list. The `name` is the stable key used everywhere outside the
/// datastore (URLs, sender identity, cancellation registry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailingList {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

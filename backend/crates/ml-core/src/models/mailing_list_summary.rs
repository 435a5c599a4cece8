use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mailing list row for the admin overview, with its current subscriber count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailingListSummary {
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub subscriber_count: i64,
}

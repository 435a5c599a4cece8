use crate::SubscriberDto;

use serde::Serialize;

/// One list with its subscribers and broadcast status
#[derive(Debug, Serialize)]
pub struct ListDetailResponse {
    pub name: String,
    pub description: String,
    pub created_at: i64,
    pub subscribers: Vec<SubscriberDto>,
    pub has_pending_broadcast: bool,
    pub is_sending: bool,
}

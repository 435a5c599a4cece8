use ml_core::MailingListSummary;

use serde::Serialize;

/// Admin overview of every list
#[derive(Debug, Serialize)]
pub struct ListSummaryResponse {
    pub lists: Vec<MailingListSummary>,
}

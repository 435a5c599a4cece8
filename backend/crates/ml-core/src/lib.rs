pub mod error;
pub mod models;
pub mod text;

pub use error::{CoreError, Result};
pub use models::broadcast_job::BroadcastJob;
pub use models::mailing_list::MailingList;
pub use models::mailing_list_summary::MailingListSummary;
pub use models::subscriber::Subscriber;
pub use text::{htmlify_body, is_email_valid, validate_email};

#[cfg(test)]
mod tests;

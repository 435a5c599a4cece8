pub mod broadcast_job;
pub mod mailing_list;
pub mod mailing_list_summary;
pub mod subscriber;

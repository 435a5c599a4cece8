pub mod broadcasts;
pub mod enqueue_mail_request;

pub mod broadcasts;
pub mod error;
pub mod lists;
pub mod subscriptions;
pub mod web_root;

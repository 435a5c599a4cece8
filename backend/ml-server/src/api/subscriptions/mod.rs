pub mod subscribe_request;
pub mod subscriptions;

use ml_core::Subscriber;

use serde::Serialize;

/// Subscriber as shown to the admin; the unsubscribe token stays private
#[derive(Debug, Clone, Serialize)]
pub struct SubscriberDto {
    pub email: String,
    pub joined_at: i64,
}

impl From<Subscriber> for SubscriberDto {
    fn from(subscriber: Subscriber) -> Self {
        Self {
            email: subscriber.email,
            joined_at: subscriber.joined_at.timestamp(),
        }
    }
}

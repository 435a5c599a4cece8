pub mod error;
pub mod pool;
pub mod repositories;

pub use error::{DbError, Result};
pub use pool::{connect, run_migrations};
pub use repositories::mailing_list_repository::MailingListRepository;
pub use repositories::subscription_repository::SubscriptionRepository;

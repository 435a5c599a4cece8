//! Broadcast dispatch for mailing lists.
//!
//! A broadcast is accepted by [`BroadcastDispatcher::dispatch`], waits out a
//! grace period during which [`CancellationRegistry::cancel`] can abort it,
//! and then sends one message per captured subscriber, paced by a
//! process-wide [`SendRateLimiter`].

pub mod broadcast_handle;
pub mod broadcast_outcome;
pub mod cancellation_registry;
pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod outbound_message;
pub mod send_rate_limiter;
pub mod transport;

pub use broadcast_handle::BroadcastHandle;
pub use broadcast_outcome::BroadcastOutcome;
pub use cancellation_registry::{CancellationRegistry, SendingGuard};
pub use dispatcher::{BroadcastDispatcher, DispatcherSettings};
pub use error::{MailerError, Result};
pub use metrics::BroadcastMetrics;
pub use outbound_message::{OutboundMessage, unsubscribe_link};
pub use send_rate_limiter::SendRateLimiter;
pub use transport::{
    HttpApiTransport, LogTransport, MailTransport, SmtpSettings, SmtpTransport,
};

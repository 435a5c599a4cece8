#![allow(dead_code)]

pub mod recording_transport;

use recording_transport::RecordingTransport;

use ml_core::{BroadcastJob, Subscriber};
use ml_mailer::{
    BroadcastDispatcher, CancellationRegistry, DispatcherSettings, MailTransport, SendRateLimiter,
};

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_DOMAIN: &str = "mail.example.com";
pub const TEST_WEB_ROOT: &str = "https://lists.example.com";

/// Limiter that never makes a test wait
pub fn unthrottled_limiter() -> SendRateLimiter {
    SendRateLimiter::with_interval(
        Duration::from_millis(1),
        NonZeroU32::new(1_000).expect("non-zero"),
    )
    .expect("limiter")
}

pub fn dispatcher_with(
    transport: Arc<RecordingTransport>,
    limiter: SendRateLimiter,
    grace_period: Duration,
    outbound_domain: Option<&str>,
) -> BroadcastDispatcher {
    let transport: Arc<dyn MailTransport> = transport;
    BroadcastDispatcher::new(
        CancellationRegistry::new(),
        Arc::new(limiter),
        transport,
        DispatcherSettings {
            outbound_domain: outbound_domain.map(str::to_string),
            sender_prefix: "mailer".to_string(),
            grace_period,
        },
    )
}

pub fn test_dispatcher(
    transport: Arc<RecordingTransport>,
    grace_period: Duration,
) -> BroadcastDispatcher {
    dispatcher_with(
        transport,
        unthrottled_limiter(),
        grace_period,
        Some(TEST_DOMAIN),
    )
}

/// Job for `list_name` whose subscribers get the token `tok-{local part}`
pub fn job(list_name: &str, emails: &[&str]) -> BroadcastJob {
    let subscribers = emails
        .iter()
        .map(|email| {
            let local = email.split('@').next().unwrap_or_default();
            Subscriber::new(*email, format!("tok-{local}"))
        })
        .collect();

    BroadcastJob::new(
        list_name,
        "Weekly update",
        "Hello\nWorld",
        subscribers,
        TEST_WEB_ROOT,
    )
}

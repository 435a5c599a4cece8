use crate::{Result as ServerErrorResult, ServerError, auth::AdminCredentials};

use ml_config::{Config, TransportKind};
use ml_mailer::{
    BroadcastDispatcher, CancellationRegistry, DispatcherSettings, HttpApiTransport,
    LogTransport, MailTransport, SendRateLimiter, SmtpSettings, SmtpTransport,
};

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use log::info;
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::SqlitePool;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub dispatcher: BroadcastDispatcher,
    pub admin: Arc<AdminCredentials>,
    /// Externally visible base URL; derived per request when unset
    pub public_url: Option<String>,
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Wire the dispatcher and its collaborators from validated configuration
    pub fn from_config(
        pool: SqlitePool,
        config: &Config,
        prometheus: Option<PrometheusHandle>,
    ) -> ServerErrorResult<Self> {
        let transport = build_transport(config)?;
        let limiter = build_rate_limiter(config)?;

        let dispatcher = BroadcastDispatcher::new(
            CancellationRegistry::new(),
            Arc::new(limiter),
            transport,
            DispatcherSettings {
                outbound_domain: config.broadcast.outbound_domain().map(str::to_string),
                sender_prefix: config.broadcast.sender_prefix.clone(),
                grace_period: config.broadcast.grace_period(),
            },
        );

        Ok(Self {
            pool,
            dispatcher,
            admin: Arc::new(AdminCredentials::new(
                config.admin.username.clone(),
                config.admin.effective_password().to_string(),
            )),
            public_url: config.server.public_url.clone(),
            prometheus,
        })
    }
}

fn build_transport(config: &Config) -> ServerErrorResult<Arc<dyn MailTransport>> {
    let transport: Arc<dyn MailTransport> = match config.transport.kind {
        TransportKind::Log => {
            info!("Mail transport: log (messages are logged, not delivered)");
            Arc::new(LogTransport::new())
        }
        TransportKind::Http => {
            let endpoint = config.transport.endpoint.clone().ok_or_else(|| {
                ServerError::Config(ml_config::ConfigError::transport(
                    "transport.endpoint is required when transport.kind = 'http'",
                ))
            })?;
            info!("Mail transport: http ({endpoint})");
            Arc::new(HttpApiTransport::new(
                endpoint,
                config.transport.api_key.clone(),
                Duration::from_secs(config.transport.timeout_secs),
            )?)
        }
        TransportKind::Smtp => {
            let required = |value: &Option<String>, key: &str| {
                value.clone().ok_or_else(|| {
                    ServerError::Config(ml_config::ConfigError::transport(format!(
                        "{key} is required when transport.kind = 'smtp'"
                    )))
                })
            };
            let settings = SmtpSettings {
                host: required(&config.transport.smtp_host, "transport.smtp_host")?,
                port: config.transport.smtp_port,
                username: required(&config.transport.smtp_user, "transport.smtp_user")?,
                password: required(&config.transport.smtp_pass, "transport.smtp_pass")?,
                timeout: Duration::from_secs(config.transport.timeout_secs),
            };
            let transport = SmtpTransport::new(settings)?;
            info!("Mail transport: smtp ({})", transport.relay());
            Arc::new(transport)
        }
    };

    Ok(transport)
}

fn build_rate_limiter(config: &Config) -> ServerErrorResult<SendRateLimiter> {
    let non_zero = |value: u32, key: &str| {
        NonZeroU32::new(value).ok_or_else(|| {
            ServerError::Config(ml_config::ConfigError::config(format!(
                "{key} must be at least 1"
            )))
        })
    };

    let rate = non_zero(config.rate_limit.sends_per_second, "rate_limit.sends_per_second")?;
    let burst = non_zero(config.rate_limit.burst, "rate_limit.burst")?;
    info!("Send rate limit: {rate}/s, burst {burst}");

    Ok(SendRateLimiter::per_second(rate, burst))
}

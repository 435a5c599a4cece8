use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("Outbound domain is not configured, refusing to broadcast {location}")]
    MissingOutboundDomain { location: ErrorLocation },

    #[error("Invalid web root '{web_root}': {message} {location}")]
    InvalidWebRoot {
        web_root: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("A broadcast to list '{list_name}' is already pending or sending {location}")]
    BroadcastInProgress {
        list_name: String,
        location: ErrorLocation,
    },

    #[error("Failed to send to {recipient}: {message} {location}")]
    Send {
        recipient: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport error sending to {recipient}: {source} {location}")]
    Transport {
        recipient: String,
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("SMTP error sending to {recipient}: {source} {location}")]
    Smtp {
        recipient: String,
        #[source]
        source: lettre::transport::smtp::Error,
        location: ErrorLocation,
    },

    #[error("Invalid transport configuration: {message} {location}")]
    InvalidTransport {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid rate limit: {message} {location}")]
    InvalidRateLimit {
        message: String,
        location: ErrorLocation,
    },

    #[error("Timed out after {waited_ms}ms waiting for a send permit {location}")]
    RateLimitTimeout {
        waited_ms: u128,
        location: ErrorLocation,
    },

    #[error("Cancelled while waiting for a send permit {location}")]
    PermitWaitCancelled { location: ErrorLocation },
}

impl MailerError {
    #[track_caller]
    pub fn send<R: Into<String>, M: Into<String>>(recipient: R, message: M) -> Self {
        MailerError::Send {
            recipient: recipient.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn transport<R: Into<String>>(recipient: R, source: reqwest::Error) -> Self {
        MailerError::Transport {
            recipient: recipient.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn smtp<R: Into<String>>(recipient: R, source: lettre::transport::smtp::Error) -> Self {
        MailerError::Smtp {
            recipient: recipient.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Whether this error was raised before any background work started
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingOutboundDomain { .. }
                | Self::InvalidWebRoot { .. }
                | Self::InvalidRateLimit { .. }
                | Self::InvalidTransport { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MailerError>;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Mailing list not found: {name} {location}")]
    ListNotFound {
        name: String,
        location: ErrorLocation,
    },

    #[error("Subscriber {email} not found on list {list_id} {location}")]
    SubscriberNotFound {
        list_id: i64,
        email: String,
        location: ErrorLocation,
    },

    #[error("Bad unsubscribe token for {email} {location}")]
    BadUnsubscribeToken {
        email: String,
        location: ErrorLocation,
    },

    #[error("{email} is already subscribed to list {list_id} {location}")]
    AlreadySubscribed {
        list_id: i64,
        email: String,
        location: ErrorLocation,
    },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    #[track_caller]
    fn from(source: sqlx::migrate::MigrateError) -> Self {
        Self::Migration {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;

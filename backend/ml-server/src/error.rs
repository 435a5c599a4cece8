use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] ml_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] ml_db::DbError),

    #[error("Mailer error: {0}")]
    Mailer(#[from] ml_mailer::MailerError),

    #[error("Failed to initialize logger: {message}")]
    Logger { message: String },

    #[error("Failed to install metrics exporter: {message}")]
    Metrics { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

//! Error types for retromail.

use thiserror::Error;

/// Common error type for retromail operations.
///
/// Every operation fails terminally with one of these; there are no retries
/// or compensating actions. Database errors from sqlx are converted
/// automatically.
#[derive(Error, Debug)]
pub enum RetromailError {
    /// No valid caller identity on the request.
    #[error("not authenticated")]
    Unauthenticated,

    /// Caller is authenticated but has not registered an address yet.
    #[error("registration required: caller has no registered address")]
    RegistrationRequired,

    /// The requested record does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Caller lacks the required relationship to the record.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Send target has no registered user.
    #[error("recipient not found: {0}")]
    RecipientNotFound(String),

    /// The identity provider supplied no email address.
    #[error("identity has no email address")]
    IdentityIncomplete,

    /// The username@domain pair is already taken.
    #[error("address already taken: {0}")]
    DuplicateAddress(String),

    /// The caller's identity already owns a registered address.
    #[error("identity already has a registered address")]
    AccountExists,

    /// Auto-provisioning could not find a free username within the cap.
    #[error("could not provision a free username after {0} attempts")]
    ProvisioningExhausted(usize),

    /// A string could not be parsed as a username@domain address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlx::Error> for RetromailError {
    fn from(e: sqlx::Error) -> Self {
        RetromailError::Database(e.to_string())
    }
}

/// Result type alias for retromail operations.
pub type Result<T> = std::result::Result<T, RetromailError>;

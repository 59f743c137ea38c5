use bcrypt::BcryptError;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tokio::task::JoinError;

/// Reasons a submitted username/password pair is rejected before it reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error("username and password cannot be empty")]
    Empty,

    #[error("username too long")]
    UsernameTooLong,

    #[error("password too long")]
    PasswordTooLong,

    #[error("username contains invalid characters")]
    InvalidUsernameCharacter,
}

#[derive(Debug, ThisError)]
pub enum CredentialError {
    #[error("Invalid credentials: {0}")]
    Validation(#[from] ValidationError),

    #[error("Password hashing error: {0}")]
    Hashing(#[from] BcryptError),

    // Database detail stays behind `source()` so callers only see a generic failure.
    #[error("persistence failure")]
    Persistence(#[from] SqlxError),

    #[error("Blocking worker error: {0}")]
    Worker(#[from] JoinError),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for CredentialError {
    fn from(e: figment::Error) -> Self {
        CredentialError::Config(Box::new(e))
    }
}

impl CredentialError {
    /// True when a persistence failure was raised by the `username` UNIQUE constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            CredentialError::Persistence(SqlxError::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

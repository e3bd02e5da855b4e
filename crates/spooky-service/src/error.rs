use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] spooky_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] spooky_core::error::CoreError),

    #[error(transparent)]
    ProviderError(#[from] spooky_geocode::GeocodeError),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Too many requests")]
    RateLimited,

    /// Another user already registered this exact address text.
    #[error("Address already registered by another user: {0}")]
    DuplicateAddress(String),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// A unique index rejected a write that passed the service checks.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

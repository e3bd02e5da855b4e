use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    DatabaseError(DieselError),

    /// A unique index rejected the write; carries the constraint name when known.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Pool error: {0}")]
    PoolError(#[from] diesel_async::pooled_connection::bb8::RunError),

    #[error(transparent)]
    CoreError(#[from] spooky_core::error::CoreError),
}

impl From<DieselError> for DbError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(
                    info.constraint_name()
                        .unwrap_or_else(|| info.message())
                        .to_string(),
                )
            }
            other => Self::DatabaseError(other),
        }
    }
}

impl DbError {
    #[must_use]
    pub const fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }
}

pub type DbResult<T> = std::result::Result<T, DbError>;

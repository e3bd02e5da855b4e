use salvo::http::StatusCode;
use salvo::writing::Json;
use serde::Serialize;
use thiserror::Error;

use spooky_core::error::CoreError;
use spooky_db::error::DbError;
use spooky_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] DbError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    /// The request body could not be read as the expected JSON shape.
    #[error("Invalid request body")]
    InvalidBody,

    #[error("{0}")]
    Unauthorized(&'static str),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

fn core_status(error: &CoreError) -> StatusCode {
    match error {
        CoreError::ValidationError(_) | CoreError::MissingRequiredField(_) => {
            StatusCode::BAD_REQUEST
        }
        CoreError::ConfigError(_) | CoreError::InvariantViolation(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn db_status(error: &DbError) -> StatusCode {
    match error {
        DbError::UniqueViolation(_) => StatusCode::CONFLICT,
        DbError::CoreError(e) => core_status(e),
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl AppError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceError(e) => match e {
                ServiceError::DatabaseError(e) => db_status(e),
                ServiceError::CoreError(e) => core_status(e),
                ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
                ServiceError::NotAuthenticated | ServiceError::InvalidToken(_) => {
                    StatusCode::UNAUTHORIZED
                }
                ServiceError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                ServiceError::DuplicateAddress(_)
                | ServiceError::UsernameTaken(_)
                | ServiceError::Conflict(_) => StatusCode::CONFLICT,
                ServiceError::ProviderError(_) | ServiceError::InvalidConfiguration(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::DatabaseError(e) => db_status(e),
            Self::CoreError(e) => core_status(e),
            Self::InvalidBody => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    /// Message shown to the client. Server errors never expose their cause.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            return INTERNAL_ERROR_MESSAGE.to_string();
        }

        match self {
            Self::ServiceError(ServiceError::NotAuthenticated) => {
                "Invalid username or password".to_string()
            }
            Self::ServiceError(ServiceError::InvalidToken(_)) => {
                "Invalid or expired token".to_string()
            }
            Self::ServiceError(ServiceError::DuplicateAddress(_)) => {
                "This address is already registered by another user".to_string()
            }
            Self::ServiceError(ServiceError::UsernameTaken(_)) => {
                "Username already exists".to_string()
            }
            Self::ServiceError(ServiceError::Conflict(_) | ServiceError::DatabaseError(_))
            | Self::DatabaseError(_) => {
                "Conflicting write, please retry".to_string()
            }
            other => other.to_string(),
        }
    }

    /// ## Summary
    /// Writes this error to `res` as `{"error": "..."}` with its status code.
    ///
    /// Server errors are logged with their full cause.
    pub fn render(&self, res: &mut salvo::Response) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        res.status_code(status);
        res.render(Json(ErrorResponse {
            error: self.public_message(),
        }));
    }
}

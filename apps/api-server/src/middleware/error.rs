//! Error handling middleware - maps domain failures onto JSON error responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use postbox_core::DomainError;
use postbox_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to `{error, missing?}` responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Validation(Vec<String>),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(missing) => write!(f, "Missing fields: {:?}", missing),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) | AppError::BadRequest(detail) => ErrorResponse::new(detail),
            AppError::Validation(missing) => ErrorResponse::missing_fields(missing.clone()),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { missing } => AppError::Validation(missing),
            DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DomainError::InvalidQueryParameter { .. } => AppError::BadRequest(err.to_string()),
            DomainError::Storage(e) => AppError::Internal(e.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

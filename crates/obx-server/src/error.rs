//! Server-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::response::ErrorResponse;

/// Result type alias for server operations
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Application error types
///
/// Version-dispatch errors carry the protocol's fixed diagnostic strings and
/// respond as plain text, matching the wire contract of the query endpoint.
/// Everything else responds with the standard JSON error envelope.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Query protocol version {0} not supported. Please use semantic version specifier, e.g., 1.0.0")]
    MalformedVersion(String),

    #[error("Query protocol version {0} not supported")]
    UnsupportedVersion(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MalformedVersion(_) => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            },
            AppError::UnsupportedVersion(_) => {
                (StatusCode::NOT_IMPLEMENTED, self.to_string()).into_response()
            },
            AppError::BadRequest(message) => {
                json_error(StatusCode::BAD_REQUEST, "BAD_REQUEST", &message)
            },
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred",
                )
            },
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
            },
            AppError::Config(ref message) => {
                tracing::error!("Configuration error: {}", message);
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    "Server configuration error",
                )
            },
        }
    }
}

impl From<crate::db::DbError> for AppError {
    fn from(err: crate::db::DbError) -> Self {
        match err {
            crate::db::DbError::Sqlx(e) => AppError::Database(e),
            crate::db::DbError::Config(msg) => AppError::Config(msg),
        }
    }
}

fn json_error(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(ErrorResponse::new(code, message))).into_response()
}

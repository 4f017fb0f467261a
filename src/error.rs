use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

pub type Result<T> = std::result::Result<T, Error>;

/// Application error taxonomy. Validation never leaves the client;
/// the rest map onto HTTP statuses on the server side and back onto
/// variants in the API client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Constraint(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Internal(String),

    #[error("{failed} of {total} deletions failed")]
    BulkDelete { failed: usize, total: usize },
}

impl Error {
    pub fn not_found(id: i64) -> Self {
        Error::NotFound(format!("Employee {} not found", id))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                let detail = message
                    .clone()
                    .unwrap_or_else(|| "constraint violation".to_string());
                Error::Constraint(detail)
            }
            _ => Error::Database(e.to_string()),
        }
    }
}

/// JSON error body, matching what the API has always returned:
/// `{"error": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::Constraint(msg) => (StatusCode::CONFLICT, msg.clone()),
            Error::Database(msg) => {
                error!(target: "db", error = %msg, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            // Transport and bulk aggregation are client-side; if one ever
            // bubbles up here, treat it as an internal failure.
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

//! Consistent error responses.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use taproom_service::ServiceError;

/// Wire shape shared by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub details: Vec<String>,
}

pub fn error_response(
    status: StatusCode,
    error: &str,
    message: impl Into<String>,
    details: Vec<String>,
) -> axum::response::Response {
    let body = ErrorBody {
        timestamp: Utc::now(),
        status: status.as_u16(),
        error: error.to_string(),
        message: message.into(),
        details,
    };
    (status, Json(body)).into_response()
}

pub fn not_found(message: impl Into<String>) -> axum::response::Response {
    error_response(StatusCode::NOT_FOUND, "Not Found", message, Vec::new())
}

pub fn invalid_id(message: impl Into<String>) -> axum::response::Response {
    error_response(StatusCode::BAD_REQUEST, "Invalid Id", message, Vec::new())
}

/// Map a service failure to its HTTP shape. Validation failures carry the
/// full field list; internal diagnostics never reach the message.
pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Validation(details) => error_response(
            StatusCode::BAD_REQUEST,
            "Validation Error",
            "Invalid request parameters",
            details,
        ),
        ServiceError::InvariantViolation(msg) => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Unprocessable Entity",
            msg,
            Vec::new(),
        ),
        ServiceError::Conflict(msg) => {
            error_response(StatusCode::CONFLICT, "Conflict", msg, Vec::new())
        }
        ServiceError::MissingReference(msg) => not_found(msg),
        ServiceError::Store(diagnostic) => {
            tracing::error!(%diagnostic, "internal failure");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "An unexpected error occurred",
                vec![diagnostic],
            )
        }
    }
}

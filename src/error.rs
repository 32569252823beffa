//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// API key is missing, invalid, disabled or expired.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid API Key")]
    InvalidApiKey,

    /// Login username/password pair did not match the configured admin.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// Body or query string could not be extracted (bad JSON, wrong content type, ...).
    ///
    /// Keeps the status axum chose (400, 415 or 422).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// Producing a key hash failed.
    #[error("Hashing error: {0}")]
    Hashing(String),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidApiKey` → 401 Unauthorized
/// - `InvalidCredentials` → 401 Unauthorized
/// - `InvalidRequest` → 400 Bad Request
/// - `Rejected` → extractor status (400/415/422), code `invalid_request`
/// - `Database`, `Hashing` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidApiKey => (
                StatusCode::UNAUTHORIZED,
                "invalid_api_key",
                self.to_string(),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                self.to_string(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Rejected { status, ref message } => {
                (status, "invalid_request", message.clone())
            }
            AppError::Database(ref err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Hashing(ref err) => {
                tracing::error!(error = %err, "hashing error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

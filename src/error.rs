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
/// This enum represents all possible errors that can occur in the application.
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Database Errors**: Any sqlx::Error from database operations
/// - **Token Errors**: Missing, malformed, or expired auth tokens
/// - **Authorization Errors**: Bad credentials or ownership mismatches
/// - **Resource Errors**: Requested entities not found
/// - **Validation Errors**: Invalid request data
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No auth token was supplied in the `x-api-key` request header.
    ///
    /// Returns HTTP 403 Forbidden.
    #[error("Missing authentication token in request")]
    MissingToken,

    /// Token is malformed or its signature does not verify.
    ///
    /// Returns HTTP 403 Forbidden.
    #[error("Invalid authentication token in request")]
    InvalidToken,

    /// Token is structurally valid but past its expiration instant.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Session expired, please login again")]
    TokenExpired,

    /// Login credentials did not match any author record.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// Authenticated author does not own the targeted record.
    ///
    /// Returns HTTP 401 Unauthorized. Never a silent no-op: the record
    /// is left untouched and the caller is told why.
    #[error("Unauthorized access: owner info doesn't match")]
    Forbidden,

    /// Requested entity does not exist (or the filtered result set is empty).
    ///
    /// Returns HTTP 404 Not Found.
    /// The String names what was missing.
    #[error("{0}")]
    NotFound(String),

    /// Request conflicts with existing state (duplicate email, already-deleted blog).
    ///
    /// Returns HTTP 409 Conflict.
    #[error("{0}")]
    Conflict(String),

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// Unexpected internal failure (e.g., token signing error).
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
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
/// - `MissingToken` / `InvalidToken` → 403 Forbidden
/// - `TokenExpired` / `InvalidCredentials` / `Forbidden` → 401 Unauthorized
/// - `NotFound` → 404 Not Found
/// - `Conflict` → 409 Conflict
/// - `InvalidRequest` → 400 Bad Request
/// - `Database` / `Internal` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::MissingToken => {
                (StatusCode::FORBIDDEN, "missing_auth_token", self.to_string())
            }
            AppError::InvalidToken => {
                (StatusCode::FORBIDDEN, "invalid_auth_token", self.to_string())
            }
            AppError::TokenExpired => {
                (StatusCode::UNAUTHORIZED, "token_expired", self.to_string())
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                self.to_string(),
            ),
            AppError::Forbidden => (StatusCode::UNAUTHORIZED, "forbidden", self.to_string()),
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Database(_) | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // Return the response with status code and JSON body
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn token_errors_map_to_expected_statuses() {
        assert_eq!(status_of(AppError::MissingToken), StatusCode::FORBIDDEN);
        assert_eq!(status_of(AppError::InvalidToken), StatusCode::FORBIDDEN);
        assert_eq!(status_of(AppError::TokenExpired), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn authorization_errors_map_to_401() {
        assert_eq!(
            status_of(AppError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(AppError::Forbidden), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn resource_and_validation_errors() {
        assert_eq!(
            status_of(AppError::NotFound("No blogs found".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Conflict("Blog has already been deleted".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::InvalidRequest("Title is required".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn internal_errors_hide_details() {
        let response = AppError::Internal(anyhow::anyhow!("secret detail")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

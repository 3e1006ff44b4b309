//! Error types for the HTTP API.
//!
//! One translation point per layer: `DbError` and `ValidationError` convert
//! into [`ApiError`] here, and `ApiError` is the only type handlers return on
//! failure. Client-caused failures keep their message; everything else logs
//! the detail server-side and sends a generic body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use tienda_core::ValidationError;
use tienda_db::DbError;

/// Machine-readable error code sent alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorCode {
    fn status(self) -> StatusCode {
        match self {
            // Conflicts surface as 400 rather than 409, matching the
            // store-detail contract clients already depend on.
            ErrorCode::BadRequest | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error with a machine code and a client-safe message.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            code: ErrorCode::BadRequest,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            code: ErrorCode::NotFound,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError {
            code: ErrorCode::Conflict,
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        ApiError {
            code: ErrorCode::Internal,
            message: "Internal server error".to_string(),
        }
    }
}

/// Serialized error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: ErrorCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code,
            message: self.message,
        };
        (self.code.status(), Json(body)).into_response()
    }
}

/// ## Error Mapping
/// ```text
/// DbError::NotFound           → 404, message kept
/// DbError::UniqueViolation    → 400, store detail kept
/// DbError (anything else)     → 500, detail logged, generic body
/// ```
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::not_found(err.to_string()),
            DbError::UniqueViolation { detail } => ApiError::conflict(detail),
            other => {
                error!(error = %other, "Database operation failed");
                ApiError::internal()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

/// Result type for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404_with_message() {
        let err: ApiError = DbError::not_found("Product", "red-shirt").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product with term \"red-shirt\" not found");
        assert_eq!(err.code.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unique_violation_maps_to_400_with_detail() {
        let err: ApiError =
            DbError::duplicate("Key (slug)=(basic_tee) already exists.").into();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "Key (slug)=(basic_tee) already exists.");
        assert_eq!(err.code.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_server_errors_get_a_generic_body() {
        let err: ApiError = DbError::QueryFailed("relation does not exist".to_string()).into();
        assert_eq!(err.code, ErrorCode::Internal);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err: ApiError = ValidationError::Negative {
            field: "price".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::BadRequest);
    }
}

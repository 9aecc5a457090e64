//! Back-office error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! All failures are request-local; the only process-fatal condition is the
//! startup-time database connection, which is handled in `main`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "Country not found",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category                 | HTTP Status               |
/// |-----------|--------------------------|---------------------------|
/// | 1000–1999 | Validation               | 400 Bad Request           |
/// | 2000–2999 | Reference/Entity Missing | 404 Not Found             |
/// | 3000–3999 | Server/Upstream          | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required field is missing or a supplied value is malformed.
    #[error("{0}")]
    Validation(String),

    /// A geography reference (country/state/city id) does not resolve.
    #[error("{0} not found")]
    ReferenceNotFound(&'static str),

    /// The target entity of a get/update/delete does not exist.
    #[error("{0} not found")]
    EntityNotFound(&'static str),

    /// The asset host rejected or failed an upload/delete. No document
    /// write is attempted after this.
    #[error("asset host error: {0}")]
    Upstream(String),

    /// Storage-layer rejection (constraint violation, connection loss).
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::ReferenceNotFound(_) => 2001,
            Self::EntityNotFound(_) => 2002,
            Self::Persistence(_) => 3001,
            Self::Upstream(_) => 3002,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::ReferenceNotFound(_) | Self::EntityNotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) | Self::Persistence(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::Validation("Country, State and City are required".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1001);
    }

    #[test]
    fn missing_reference_and_entity_map_to_404() {
        assert_eq!(
            ApiError::ReferenceNotFound("Country").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::EntityNotFound("Tour").status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn upstream_and_persistence_map_to_500() {
        assert_eq!(
            ApiError::Upstream("upload rejected".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Persistence("null value in column".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_the_entity() {
        let err = ApiError::ReferenceNotFound("State");
        assert_eq!(err.to_string(), "State not found");
    }
}

/**
 * Backend Error Types
 *
 * This module defines the error taxonomy for the HTTP API. Every failure
 * a handler can produce is one of these variants, and each variant has a
 * fixed HTTP status code:
 *
 * - `Validation` - empty required field (400)
 * - `InvalidId`  - id fails the UUID format check (400)
 * - `NotFound`   - unknown record id (404)
 * - `Unavailable`- store unreachable or connection attempt timed out (503)
 * - `Store`      - any other store error (500, detail logged server-side)
 *
 * Validation and not-found errors are request-local and surfaced with a
 * human-readable message. Connectivity errors carry a remediation hint.
 * Unclassified store errors never leak internal detail to the caller.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// API error taxonomy
///
/// Each variant maps to a fixed HTTP status code via [`ApiError::status_code`]
/// and a caller-facing message via [`ApiError::message`]. Handlers return
/// `Result<_, ApiError>` and the `IntoResponse` impl in `conversion`
/// renders the JSON error body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field failed validation (e.g. empty text)
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// The id path parameter is not a valid UUID
    #[error("Invalid todo id: {value}")]
    InvalidId {
        /// The malformed id as received
        value: String,
    },

    /// No record with the requested id
    #[error("{message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// The store is unreachable or the connection attempt timed out
    #[error("{message}")]
    Unavailable {
        /// Message including a remediation hint
        message: String,
    },

    /// Any other store failure; detail is logged, never surfaced
    #[error("Store error: {detail}")]
    Store {
        /// Internal detail, for server-side logs only
        detail: String,
    },
}

impl ApiError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new malformed-id error
    pub fn invalid_id(value: impl Into<String>) -> Self {
        Self::InvalidId {
            value: value.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new service-unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a new unclassified store error
    pub fn store(detail: impl Into<String>) -> Self {
        Self::Store {
            detail: detail.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` - 400 Bad Request
    /// - `InvalidId` - 400 Bad Request
    /// - `NotFound` - 404 Not Found
    /// - `Unavailable` - 503 Service Unavailable
    /// - `Store` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidId { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the caller-facing error message
    ///
    /// Unclassified store errors return a generic message; their detail
    /// stays in the server logs.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::InvalidId { value } => format!("Invalid todo id: {}", value),
            Self::NotFound { message } => message.clone(),
            Self::Unavailable { message } => message.clone(),
            Self::Store { .. } => "Internal server error".to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable { message } => Self::Unavailable {
                message: format!(
                    "{}. Check DATABASE_URL and that the database is reachable.",
                    message
                ),
            },
            StoreError::Query(e) => Self::store(e.to_string()),
        }
    }
}

impl From<SharedError> for ApiError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { field, message } => Self::Validation { field, message },
            SharedError::SerializationError { message } => Self::store(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::validation("text", "empty").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::invalid_id("nope").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::not_found("missing").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::unavailable("down").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::store("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_detail_not_leaked() {
        let error = ApiError::store("connection reset by postgres at 10.0.0.3");
        assert_eq!(error.message(), "Internal server error");
    }

    #[test]
    fn test_unavailable_carries_remediation_hint() {
        let error: ApiError = StoreError::unavailable("connect timed out").into();
        assert!(error.message().contains("DATABASE_URL"));
        assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_from_shared_validation() {
        let error: ApiError = SharedError::validation("text", "cannot be empty").into();
        match error {
            ApiError::Validation { field, .. } => assert_eq!(field, "text"),
            _ => panic!("Expected Validation variant"),
        }
    }
}

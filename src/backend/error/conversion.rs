/**
 * Error Conversion
 *
 * This module converts `ApiError` values into HTTP responses so handlers
 * can return them directly with `?`.
 *
 * # Response Format
 *
 * Error responses are JSON with the following structure:
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 *
 * Unclassified store errors (500) log their detail server-side before the
 * generic body is rendered.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let ApiError::Store { detail } = &self {
            tracing::error!("Store error surfaced as 500: {}", detail);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

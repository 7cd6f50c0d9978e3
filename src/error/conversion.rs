/**
 * Error Conversion
 *
 * Converts `ApiError` into an HTTP response. All error responses share one
 * shape: a JSON object with a `message` field and the status code mapped by
 * the error variant. Server errors are logged here with full detail; client
 * errors are logged at warn.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {:?}", self);
        } else {
            tracing::warn!(%status, "Request rejected: {}", message);
        }

        let body = serde_json::json!({ "message": message });
        (status, Json(body)).into_response()
    }
}

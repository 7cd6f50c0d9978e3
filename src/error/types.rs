/**
 * API Error Types
 *
 * This module defines the error type returned by HTTP handlers and services.
 * Each variant maps to a fixed HTTP status code; the message is what the
 * client sees in the response body.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// Error returned by handlers, middleware, and the session service.
///
/// Every variant carries the client-facing message. Store and crypto
/// failures are logged where they occur and surface as `Internal` so no
/// backend detail leaks to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input (400)
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid, or expired credential or token (401)
    #[error("{0}")]
    Authentication(String),

    /// Authenticated but insufficient role (403)
    #[error("{0}")]
    Authorization(String),

    /// Referenced entity absent (404)
    #[error("{0}")]
    NotFound(String),

    /// Duplicate unique key (409)
    #[error("{0}")]
    Conflict(String),

    /// Unexpected server-side failure (500)
    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::Authorization(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Default mapping from store failures.
///
/// Services that know better (e.g. a duplicate email on registration)
/// map `StoreError` explicitly before this fallback applies.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(entity) => {
                Self::Conflict(format!("{entity} already exists"))
            }
            StoreError::RowNotFound => Self::NotFound("Resource not found".to_string()),
            StoreError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                Self::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::authentication("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::authorization("wrong role").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::not_found("gone").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::conflict("dup").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_is_client_facing() {
        let err = ApiError::conflict("User already exists");
        assert_eq!(err.message(), "User already exists");
    }

    #[test]
    fn test_internal_hides_detail() {
        assert_eq!(ApiError::Internal.message(), "Internal Server Error");
    }

    #[test]
    fn test_from_store_duplicate() {
        let err: ApiError = StoreError::Duplicate("category").into();
        match err {
            ApiError::Conflict(message) => assert_eq!(message, "category already exists"),
            _ => panic!("Expected Conflict"),
        }
    }

    #[test]
    fn test_from_store_row_not_found() {
        let err: ApiError = StoreError::RowNotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}

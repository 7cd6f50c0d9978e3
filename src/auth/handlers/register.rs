/**
 * Register Handler
 *
 * Handles POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate the request body
 * 2. Hash the password (bcrypt) and insert the user
 * 3. Return 201 with the sanitized user projection
 *
 * Duplicate emails are caught by the store's unique constraint and
 * surface as 409 Conflict. No tokens are issued on registration; the
 * client logs in separately.
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::auth::service::SessionService;
use crate::error::ApiError;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - invalid name/age/email/password/phone
/// * `409 Conflict` - a user with this email already exists
/// * `500 Internal Server Error` - hashing or store failure
pub async fn register(
    State(sessions): State<SessionService>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    tracing::info!(email = %request.email, "Register request");

    let user = sessions.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: user.into(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::handlers::test_support::test_sessions;
    use crate::store::Role;

    fn request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "John Doe".to_string(),
            age: 20,
            email: email.to_string(),
            password: "secret1".to_string(),
            phone: "+123456789012".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let sessions = test_sessions();

        let result = register(State(sessions), Json(request("a@b.com"))).await;
        let (status, response) = result.unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response.message, "User registered successfully");
        assert_eq!(response.user.email, "a@b.com");
        assert_eq!(response.user.role, Role::User);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let sessions = test_sessions();

        register(State(sessions.clone()), Json(request("a@b.com")))
            .await
            .unwrap();
        let err = register(State(sessions), Json(request("a@b.com")))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.message(), "User already exists");
    }

    #[tokio::test]
    async fn test_register_invalid_body() {
        let sessions = test_sessions();

        let mut invalid = request("a@b.com");
        invalid.age = 7;
        let err = register(State(sessions), Json(invalid)).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}

/**
 * Authentication Middleware
 *
 * Request gates protecting routes that require identity. Two variants
 * share one implementation:
 *
 * - `require_auth` authenticates only;
 * - `require_role(allowed)` authenticates, then checks the resolved
 *   user's role against a closed set fixed at route registration.
 *
 * Both read the access token from the `accessToken` cookie, verify its
 * signature and expiry, and then re-resolve the user record from the
 * store. The token is trusted only for the subject identity; role and
 * profile always come from the store, so a revoked or changed account
 * takes effect without a token revocation list.
 */

use std::future::Future;
use std::pin::Pin;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::cookies::ACCESS_COOKIE;
use crate::error::ApiError;
use crate::server::state::AppState;
use crate::store::{Role, User};

/// The request-scoped identity projection attached after successful
/// authentication. Derived fresh from the store on every request.
#[derive(Clone, Debug, Serialize)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub role: Role,
    pub phone: String,
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            age: user.age,
            role: user.role,
            phone: user.phone,
        }
    }
}

/// Extractor for the principal attached by the gates.
///
/// Handlers behind `require_auth`/`require_role` take `Principal` as a
/// parameter; using it on an ungated route rejects with 401.
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Principal>().cloned().ok_or_else(|| {
            tracing::warn!("Principal missing from request extensions");
            ApiError::authentication("Unauthorized")
        })
    }
}

/// Shared gate implementation.
///
/// 1. Extract the access token from the cookie store
/// 2. Verify signature and expiry
/// 3. Re-resolve the user row (stale subjects are rejected)
/// 4. Optionally enforce role membership
/// 5. Attach the `Principal` and continue
async fn gate(
    state: AppState,
    jar: CookieJar,
    mut request: Request,
    next: Next,
    allowed_roles: Option<&'static [Role]>,
) -> Result<Response, ApiError> {
    let token = jar
        .get(ACCESS_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| {
            tracing::warn!("Request without access token cookie");
            ApiError::authentication("Unauthorized: no valid access token")
        })?;

    let claims = state.tokens.verify_access(&token).map_err(|e| {
        tracing::warn!("Invalid access token: {:?}", e);
        ApiError::authentication("Invalid or expired token")
    })?;

    let user_id = claims
        .user_id()
        .map_err(|_| ApiError::authentication("Invalid or expired token"))?;

    let user = state
        .store
        .user_by_id(user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(%user_id, "Token subject no longer resolves to a user");
            ApiError::authentication("Unauthorized: user not found")
        })?;

    if let Some(allowed) = allowed_roles {
        if !allowed.contains(&user.role) {
            tracing::warn!(user_id = %user.id, role = %user.role, "Role not permitted for route");
            return Err(ApiError::authorization("Forbidden: insufficient permissions"));
        }
    }

    request.extensions_mut().insert(Principal::from(user));

    Ok(next.run(request).await)
}

/// Authenticate-only gate (401 on failure).
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    gate(state, jar, request, next, None).await
}

/// Authenticate-and-authorize gate (401 unauthenticated, 403 on role
/// mismatch). The allowed set is a closed enum slice decided at route
/// registration time.
pub fn require_role(
    allowed_roles: &'static [Role],
) -> impl Fn(
    State<AppState>,
    CookieJar,
    Request,
    Next,
) -> Pin<Box<dyn Future<Output = Result<Response, ApiError>> + Send>>
       + Clone {
    move |State(state): State<AppState>, jar: CookieJar, request: Request, next: Next| {
        Box::pin(gate(state, jar, request, next, Some(allowed_roles)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::Utc;

    use crate::store::Role;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            name: "John Doe".to_string(),
            age: 20,
            phone: "+123456789012".to_string(),
            role: Role::Courier,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_principal_from_user() {
        let user = sample_user();
        let principal = Principal::from(user.clone());
        assert_eq!(principal.id, user.id);
        assert_eq!(principal.role, Role::Courier);
    }

    #[test]
    fn test_principal_serialization_has_no_hash() {
        let principal = Principal::from(sample_user());
        let json = serde_json::to_value(&principal).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "COURIER");
    }

    #[tokio::test]
    async fn test_principal_extractor_missing() {
        let request = axum::http::Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let extracted = Principal::from_request_parts(&mut parts, &()).await;
        assert_eq!(
            extracted.unwrap_err().status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_principal_extractor_present() {
        let request = axum::http::Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let principal = Principal::from(sample_user());
        parts.extensions.insert(principal.clone());

        let extracted = Principal::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(extracted.id, principal.id);
    }
}

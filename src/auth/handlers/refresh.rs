/**
 * Refresh Handler
 *
 * Handles GET /api/auth/refresh-token.
 *
 * Reads the `refreshToken` cookie, rotates the stored credential, and sets
 * a fresh cookie pair. The old refresh token is permanently unusable once
 * this endpoint responds; replaying it yields 401.
 */

use axum::{extract::State, response::Json};
use axum_extra::extract::CookieJar;

use crate::auth::cookies::{access_cookie, refresh_cookie, REFRESH_COOKIE};
use crate::auth::handlers::types::MessageResponse;
use crate::auth::service::SessionService;
use crate::error::ApiError;

/// Refresh-token handler
///
/// # Errors
///
/// * `401 Unauthorized` - missing cookie, unknown or unverifiable token,
///   or a concurrent rotation won
/// * `404 Not Found` - the token subject no longer resolves to a user
pub async fn refresh_token(
    State(sessions): State<SessionService>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| {
            tracing::warn!("Refresh request without refresh cookie");
            ApiError::authentication("Invalid refresh token")
        })?;

    let tokens = sessions.refresh(&token).await?;

    let jar = jar
        .add(access_cookie(
            tokens.access_token,
            sessions.issuer().access_ttl_secs(),
        ))
        .add(refresh_cookie(
            tokens.refresh_token,
            sessions.issuer().refresh_ttl_secs(),
        ));

    Ok((jar, Json(MessageResponse::new("Token refreshed successfully"))))
}

/**
 * Login Handler
 *
 * Handles POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up the user by email
 * 2. Verify the password against the stored bcrypt hash
 * 3. Issue an access token (15 m, sub + role) and a refresh token (7 d)
 * 4. Persist the refresh token row and set both httpOnly cookies
 *
 * Unknown email and wrong password both return 401 with the same message
 * so the endpoint cannot be used for user enumeration.
 */

use axum::{extract::State, response::Json};
use axum_extra::extract::CookieJar;

use crate::auth::cookies::{access_cookie, refresh_cookie};
use crate::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::auth::service::SessionService;
use crate::error::ApiError;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or wrong password
/// * `500 Internal Server Error` - store or token failure
pub async fn login(
    State(sessions): State<SessionService>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    tracing::info!(email = %request.email, "Login request");

    let (tokens, user) = sessions.login(request).await?;

    let jar = jar
        .add(access_cookie(
            tokens.access_token,
            sessions.issuer().access_ttl_secs(),
        ))
        .add(refresh_cookie(
            tokens.refresh_token,
            sessions.issuer().refresh_ttl_secs(),
        ));

    Ok((
        jar,
        Json(AuthResponse {
            message: "Logged in successfully".to_string(),
            user: user.into(),
        }),
    ))
}

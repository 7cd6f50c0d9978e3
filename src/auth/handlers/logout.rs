/**
 * Logout Handler
 *
 * Handles GET /api/auth/logout.
 *
 * Removes the stored refresh token (if any) and clears both session
 * cookies. Always responds 200: a request without a cookie, or with a
 * token that is already gone, is treated the same as a normal logout.
 */

use axum::{extract::State, response::Json};
use axum_extra::extract::CookieJar;

use crate::auth::cookies::{removal_cookie, ACCESS_COOKIE, REFRESH_COOKIE};
use crate::auth::handlers::types::MessageResponse;
use crate::auth::service::SessionService;

/// Logout handler. Infallible from the client's perspective.
pub async fn logout(
    State(sessions): State<SessionService>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string());

    sessions.logout(token.as_deref()).await;

    let jar = jar
        .remove(removal_cookie(ACCESS_COOKIE))
        .remove(removal_cookie(REFRESH_COOKIE));

    (jar, Json(MessageResponse::new("Logged out successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Cookie;

    use crate::auth::handlers::test_support::{login_user, register_user, test_sessions};

    #[tokio::test]
    async fn test_logout_clears_cookies() {
        let sessions = test_sessions();
        register_user(&sessions, "a@b.com", "secret1").await;
        let tokens = login_user(&sessions, "a@b.com", "secret1").await;

        let jar = CookieJar::new().add(Cookie::new(REFRESH_COOKIE, tokens.refresh_token.clone()));
        let (jar, response) = logout(State(sessions.clone()), jar).await;

        assert_eq!(response.message, "Logged out successfully");
        assert!(jar.get(REFRESH_COOKIE).is_none());

        // The token row is gone, so refreshing with it now fails.
        assert!(sessions.refresh(&tokens.refresh_token).await.is_err());
    }

    #[tokio::test]
    async fn test_logout_without_cookie_succeeds() {
        let sessions = test_sessions();
        let (_, response) = logout(State(sessions), CookieJar::new()).await;
        assert_eq!(response.message, "Logged out successfully");
    }

    #[tokio::test]
    async fn test_logout_twice_is_idempotent() {
        let sessions = test_sessions();
        register_user(&sessions, "a@b.com", "secret1").await;
        let tokens = login_user(&sessions, "a@b.com", "secret1").await;

        let jar = CookieJar::new().add(Cookie::new(REFRESH_COOKIE, tokens.refresh_token.clone()));
        logout(State(sessions.clone()), jar).await;

        let jar = CookieJar::new().add(Cookie::new(REFRESH_COOKIE, tokens.refresh_token));
        let (_, response) = logout(State(sessions), jar).await;
        assert_eq!(response.message, "Logged out successfully");
    }
}

/**
 * Get Current User Handler
 *
 * Handles GET /api/auth/me. The route is wrapped by the authenticate-only
 * gate, which verified the access cookie and attached a `Principal`
 * resolved fresh from the store; this handler just returns it.
 */

use axum::response::Json;

use crate::middleware::auth::Principal;

/// Current-user handler; the auth gate guarantees the principal exists.
pub async fn get_me(principal: Principal) -> Json<Principal> {
    Json(principal)
}

/**
 * API Route Handlers
 *
 * This module defines the API route table:
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login, sets session cookies
 * - `GET /api/auth/me` - Current user (requires authentication)
 * - `GET /api/auth/refresh-token` - Rotate the refresh token
 * - `GET /api/auth/logout` - End the session, clears cookies
 *
 * ## Admin
 * - `GET /api/admin/stats` - Admin greeting (requires ADMIN role)
 *
 * ## Categories
 * - `GET /api/categories` - List categories (public)
 * - `POST /api/categories` - Create category (ADMIN)
 * - `GET /api/categories/{id}` - Fetch a category (public)
 * - `PATCH /api/categories/{id}` - Update a category (ADMIN)
 * - `DELETE /api/categories/{id}` - Delete a category (ADMIN)
 *
 * # Authorization
 *
 * Gates are attached per route at registration time. Role-gated routes
 * name their allowed roles as a closed enum slice, so a new role
 * variant forces every gate to be revisited at compile time.
 */

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Json, Router,
};

use crate::auth::handlers::{get_me, login, logout, refresh_token, register};
use crate::auth::MessageResponse;
use crate::categories::{
    create_category, delete_category, get_category, list_categories, update_category,
};
use crate::middleware::{require_auth, require_role, Principal};
use crate::server::state::AppState;
use crate::store::Role;

/// GET /api/admin/stats
///
/// Minimal ADMIN-gated endpoint; the gate has already verified the
/// role, so the handler only greets.
pub async fn admin_stats(principal: Principal) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!(
        "Welcome admin {}",
        principal.name
    )))
}

/// Configure API routes.
///
/// Takes the state separately from the router because the auth gates
/// are state-bound layers created here.
pub fn configure_api_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let authenticated = middleware::from_fn_with_state(state.clone(), require_auth);
    let admin_only = middleware::from_fn_with_state(state.clone(), require_role(&[Role::Admin]));

    router
        // Authentication endpoints
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route(
            "/api/auth/me",
            get(get_me).route_layer(authenticated),
        )
        .route("/api/auth/refresh-token", get(refresh_token))
        .route("/api/auth/logout", get(logout))
        // Admin endpoints
        .route(
            "/api/admin/stats",
            get(admin_stats).route_layer(admin_only.clone()),
        )
        // Category endpoints; mutations carry the ADMIN gate, reads stay public
        .route(
            "/api/categories",
            get(list_categories)
                .merge(post(create_category).route_layer(admin_only.clone())),
        )
        .route(
            "/api/categories/{id}",
            get(get_category).merge(
                patch(update_category)
                    .merge(delete(delete_category))
                    .route_layer(admin_only),
            ),
        )
}

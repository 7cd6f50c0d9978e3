/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * the API route table with the shared middleware stack.
 *
 * # Layers
 *
 * - `TraceLayer` for per-request logs
 * - `CorsLayer` mirroring the request origin with credentials enabled,
 *   since the session rides in cookies
 * - A JSON 404 fallback matching the error body shape
 */

use axum::{http::Method, http::StatusCode, Json, Router};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), &app_state);

    // Cookies only flow cross-origin with credentials enabled, and
    // credentials forbid the wildcard origin, so mirror the caller.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true);

    router
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Not Found" })),
            )
        })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

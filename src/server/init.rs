/**
 * Server Initialization
 *
 * This module handles the initialization of the Axum HTTP server:
 * connecting the database pool, running migrations, assembling the
 * application state and building the router.
 *
 * # Initialization Process
 *
 * 1. Connect a PostgreSQL pool from `AppConfig::database_url`
 * 2. Run embedded migrations
 * 3. Build the token issuer from the signing configuration
 * 4. Wire the Postgres-backed stores into `AppState`
 * 5. Create the router
 */

use std::sync::Arc;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::auth::TokenIssuer;
use crate::routes::create_router;
use crate::server::config::AppConfig;
use crate::server::state::AppState;
use crate::store::postgres::{PgCategoryStore, PgCredentialStore};

/// Connect the database pool and run migrations.
pub async fn load_database(database_url: &str) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {:?}", e);
        sqlx::Error::from(e)
    })?;
    tracing::info!("Database migrations completed");

    Ok(pool)
}

/// Create and configure the Axum application.
pub async fn create_app(config: &AppConfig) -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing storefront backend server");

    let pool = load_database(&config.database_url).await?;

    let state = AppState::new(
        Arc::new(PgCredentialStore::new(pool.clone())),
        Arc::new(PgCategoryStore::new(pool)),
        TokenIssuer::new(&config.auth),
    );

    Ok(create_router(state))
}

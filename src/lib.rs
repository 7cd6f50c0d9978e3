//! Storefront - Main Library
//!
//! Backend for an e-commerce storefront: account registration, cookie
//! based JWT sessions with refresh rotation, role-gated routes and the
//! catalog category tree.
//!
//! # Module Structure
//!
//! - **`auth`** - Session lifecycle: password hashing, token issuance,
//!   cookie transport and the auth HTTP handlers
//! - **`store`** - Persistence traits with Postgres and in-memory
//!   implementations
//! - **`middleware`** - Request gates (`require_auth`, `require_role`)
//!   and the `Principal` identity projection
//! - **`categories`** - Catalog category CRUD
//! - **`error`** - The `ApiError` taxonomy and its HTTP conversion
//! - **`server`** - Configuration, application state and startup
//! - **`routes`** - Route table and middleware layers
//!
//! # Usage
//!
//! ```rust,no_run
//! use storefront::server::{create_app, AppConfig};
//!
//! # async fn example() -> Result<(), sqlx::Error> {
//! let config = AppConfig::from_env();
//! let app = create_app(&config).await?;
//! // Serve `app` with axum
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod categories;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod store;

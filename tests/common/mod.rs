//! Integration test helpers
//!
//! Provides a `TestServer` over the full router wired to in-memory
//! stores, plus utilities for seeding users and logging in.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum_test::{TestServer, TestServerConfig};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use storefront::auth::tokens::AuthConfig;
use storefront::auth::TokenIssuer;
use storefront::routes::create_router;
use storefront::server::AppState;
use storefront::store::memory::{InMemoryCategoryStore, InMemoryCredentialStore};
use storefront::store::{Role, User};

/// Bcrypt cost for test fixtures; the default cost makes suites crawl.
pub const TEST_BCRYPT_COST: u32 = 4;

pub struct TestContext {
    pub server: TestServer,
    pub users: Arc<InMemoryCredentialStore>,
    pub categories: Arc<InMemoryCategoryStore>,
}

/// Build the full application over in-memory stores.
///
/// Cookie persistence is enabled so a login carries into subsequent
/// requests, the way a browser would behave.
pub fn test_context() -> TestContext {
    let users = Arc::new(InMemoryCredentialStore::new());
    let categories = Arc::new(InMemoryCategoryStore::new());
    let config = AuthConfig {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        access_ttl_secs: 15 * 60,
        refresh_ttl_secs: 7 * 24 * 60 * 60,
    };
    let state = AppState::new(
        users.clone(),
        categories.clone(),
        TokenIssuer::new(&config),
    );

    let server = TestServer::new_with_config(
        create_router(state),
        TestServerConfig {
            save_cookies: true,
            ..TestServerConfig::default()
        },
    )
    .expect("failed to start test server");

    TestContext {
        server,
        users,
        categories,
    }
}

/// Seed a user directly into the store, bypassing the HTTP surface.
///
/// Registration always assigns the USER role, so elevated accounts are
/// provisioned here.
pub fn seed_user(ctx: &TestContext, email: &str, password: &str, role: Role) -> User {
    let user = User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: bcrypt::hash(password, TEST_BCRYPT_COST).expect("hash"),
        name: "Seeded User".to_string(),
        age: 30,
        phone: "+12025550100".to_string(),
        role,
        created_at: Utc::now(),
    };
    ctx.users.seed_user(user.clone());
    user
}

/// Register a user through the API with valid defaults.
pub async fn register_user(ctx: &TestContext, email: &str, password: &str) {
    let response = ctx
        .server
        .post("/api/auth/register")
        .json(&json!({
            "name": "Jane Doe",
            "age": 28,
            "email": email,
            "password": password,
            "phone": "+12025550123",
        }))
        .await;
    assert_eq!(response.status_code().as_u16(), 201);
}

/// Log in through the API, storing session cookies on the server.
pub async fn login_user(ctx: &TestContext, email: &str, password: &str) {
    let response = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    assert_eq!(response.status_code().as_u16(), 200);
}

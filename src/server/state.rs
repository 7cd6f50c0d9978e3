/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` conversions for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container, holding:
 * - The credential store (users and refresh tokens)
 * - The category store
 * - The token issuer (signing/verification keys and TTLs)
 * - The session service composing store and issuer
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract just the part of
 * the state they need, e.g. `State<SessionService>` for auth handlers
 * or `State<Arc<dyn CategoryStore>>` for catalog handlers.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::{SessionService, TokenIssuer};
use crate::store::{CategoryStore, CredentialStore};

/// Central state container shared across all routes.
///
/// Stores are held behind trait objects so the router can be built
/// over Postgres in production and over in-memory stores in tests.
#[derive(Clone)]
pub struct AppState {
    /// Users and refresh tokens.
    pub store: Arc<dyn CredentialStore>,

    /// Category catalog.
    pub categories: Arc<dyn CategoryStore>,

    /// JWT signing and verification.
    pub tokens: TokenIssuer,

    /// Registration, login, refresh rotation and logout.
    pub sessions: SessionService,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        categories: Arc<dyn CategoryStore>,
        tokens: TokenIssuer,
    ) -> Self {
        let sessions = SessionService::new(store.clone(), tokens.clone());
        Self {
            store,
            categories,
            tokens,
            sessions,
        }
    }
}

impl FromRef<AppState> for SessionService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<dyn CredentialStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for Arc<dyn CategoryStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.categories.clone()
    }
}

impl FromRef<AppState> for TokenIssuer {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::tokens::AuthConfig;
    use crate::store::memory::{InMemoryCategoryStore, InMemoryCredentialStore};

    fn test_state() -> AppState {
        let config = AuthConfig {
            access_secret: "access".to_string(),
            refresh_secret: "refresh".to_string(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 604_800,
        };
        AppState::new(
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(InMemoryCategoryStore::new()),
            TokenIssuer::new(&config),
        )
    }

    #[test]
    fn test_from_ref_extractions() {
        let state = test_state();
        let _sessions = SessionService::from_ref(&state);
        let _store = <Arc<dyn CredentialStore>>::from_ref(&state);
        let _categories = <Arc<dyn CategoryStore>>::from_ref(&state);
        let _tokens = TokenIssuer::from_ref(&state);
    }
}

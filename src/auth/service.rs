/**
 * Session Service
 *
 * Orchestrates the credential store, password hasher, and token issuer
 * for the four session-lifecycle operations: register, login, refresh
 * rotation, and logout.
 *
 * # Invariants
 *
 * - Duplicate registration is arbitrated by the store's unique email
 *   constraint, not by a check-then-insert race.
 * - Login verifies the bcrypt hash before issuing any token.
 * - A refresh token becomes permanently unusable the instant its rotation
 *   succeeds; of two concurrent rotations exactly one wins.
 * - Logout is idempotent and never surfaces store failures to the caller.
 */

use std::sync::Arc;

use uuid::Uuid;

use crate::auth::handlers::types::{LoginRequest, RegisterRequest};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::tokens::TokenIssuer;
use crate::error::ApiError;
use crate::store::{CredentialStore, NewRefreshToken, NewUser, Role, StoreError, User};

/// A freshly issued access/refresh pair.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Session-lifecycle orchestration over the credential store and token
/// issuer. Cheap to clone; all state lives behind `Arc`s.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn CredentialStore>,
    tokens: TokenIssuer,
}

impl SessionService {
    pub fn new(store: Arc<dyn CredentialStore>, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Register a new user with role USER.
    ///
    /// The store's unique constraint is the guard against duplicate
    /// emails; its violation surfaces as `ConflictError` here.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, ApiError> {
        let password_hash = hash_password(&request.password).map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            ApiError::Internal
        })?;

        let user = self
            .store
            .create_user(NewUser {
                email: request.email,
                password_hash,
                name: request.name,
                age: request.age,
                phone: request.phone,
            })
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(_) => ApiError::conflict("User already exists"),
                other => other.into(),
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Authenticate by email and password, then issue a token pair.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller. The login-issued access token carries the role claim.
    pub async fn login(&self, request: LoginRequest) -> Result<(SessionTokens, User), ApiError> {
        let user = self
            .store
            .user_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Login attempt for unknown email");
                ApiError::authentication("Invalid credentials")
            })?;

        let valid = verify_password(&request.password, &user.password_hash).map_err(|e| {
            tracing::error!("Password verification error: {:?}", e);
            ApiError::Internal
        })?;

        if !valid {
            tracing::warn!(user_id = %user.id, "Invalid password");
            return Err(ApiError::authentication("Invalid credentials"));
        }

        let tokens = self.issue_session(&user, Some(user.role)).await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok((tokens, user))
    }

    /// Rotate a refresh token: verify, re-resolve the user, then atomically
    /// replace the stored row with a fresh pair.
    ///
    /// The old token is permanently unusable once this returns; a
    /// concurrent rotation of the same token fails with 401 because the
    /// store row is already gone.
    pub async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens, ApiError> {
        let stored = self
            .store
            .refresh_token_by_value(refresh_token)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Refresh attempt with unknown token");
                ApiError::authentication("Invalid refresh token")
            })?;

        let claims = self.tokens.verify_refresh(refresh_token).map_err(|e| {
            tracing::warn!(user_id = %stored.user_id, "Refresh token failed verification: {:?}", e);
            ApiError::authentication("Invalid refresh token")
        })?;

        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::authentication("Invalid refresh token"))?;

        let user = self
            .store
            .user_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        // Refresh-minted access tokens are subject-only; the auth gate
        // re-resolves the role from the store on every request.
        let access_token = self.tokens.issue_access(user.id, None).map_err(|e| {
            tracing::error!("Failed to create access token: {:?}", e);
            ApiError::Internal
        })?;
        let (new_refresh, expires_at) = self.tokens.issue_refresh(user.id).map_err(|e| {
            tracing::error!("Failed to create refresh token: {:?}", e);
            ApiError::Internal
        })?;

        self.store
            .rotate_refresh_token(
                refresh_token,
                NewRefreshToken {
                    user_id: user.id,
                    token: new_refresh.clone(),
                    expires_at,
                },
            )
            .await
            .map_err(|e| match e {
                StoreError::RowNotFound => {
                    tracing::warn!(user_id = %user.id, "Refresh token rotated concurrently");
                    ApiError::authentication("Invalid refresh token")
                }
                other => other.into(),
            })?;

        tracing::debug!(user_id = %user.id, "Refresh token rotated");
        Ok(SessionTokens {
            access_token,
            refresh_token: new_refresh,
        })
    }

    /// Remove the stored refresh token, if any.
    ///
    /// Always succeeds from the caller's perspective: a missing token is a
    /// no-op and store failures are logged and swallowed.
    pub async fn logout(&self, refresh_token: Option<&str>) {
        let Some(token) = refresh_token else {
            return;
        };

        match self.store.delete_refresh_token(token).await {
            Ok(true) => tracing::debug!("Refresh token removed on logout"),
            Ok(false) => tracing::debug!("Logout for an already-removed refresh token"),
            Err(e) => tracing::warn!("Failed to delete refresh token on logout: {:?}", e),
        }
    }

    /// Resolve the current user record, fresh from the store.
    pub async fn current_user(&self, user_id: Uuid) -> Result<User, ApiError> {
        self.store
            .user_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))
    }

    async fn issue_session(
        &self,
        user: &User,
        role: Option<Role>,
    ) -> Result<SessionTokens, ApiError> {
        let access_token = self.tokens.issue_access(user.id, role).map_err(|e| {
            tracing::error!("Failed to create access token: {:?}", e);
            ApiError::Internal
        })?;
        let (refresh_token, expires_at) = self.tokens.issue_refresh(user.id).map_err(|e| {
            tracing::error!("Failed to create refresh token: {:?}", e);
            ApiError::Internal
        })?;

        self.store
            .insert_refresh_token(NewRefreshToken {
                user_id: user.id,
                token: refresh_token.clone(),
                expires_at,
            })
            .await?;

        Ok(SessionTokens {
            access_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::tokens::{AuthConfig, ACCESS_TTL_SECS, REFRESH_TTL_SECS};
    use crate::store::memory::InMemoryCredentialStore;

    fn service() -> (SessionService, Arc<InMemoryCredentialStore>) {
        let store = Arc::new(InMemoryCredentialStore::new());
        let tokens = TokenIssuer::new(&AuthConfig {
            access_secret: "access-test-secret".to_string(),
            refresh_secret: "refresh-test-secret".to_string(),
            access_ttl_secs: ACCESS_TTL_SECS,
            refresh_ttl_secs: REFRESH_TTL_SECS,
        });
        (
            SessionService::new(store.clone() as Arc<dyn CredentialStore>, tokens),
            store,
        )
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "John Doe".to_string(),
            age: 20,
            email: email.to_string(),
            password: "secret1".to_string(),
            phone: "+123456789012".to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_defaults_to_user_role() {
        let (service, _) = service();
        let user = service.register(register_request("a@b.com")).await.unwrap();
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password_hash, "secret1");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let (service, _) = service();
        service.register(register_request("a@b.com")).await.unwrap();

        let err = service
            .register(register_request("a@b.com"))
            .await
            .unwrap_err();
        match err {
            ApiError::Conflict(message) => assert_eq!(message, "User already exists"),
            other => panic!("Expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_tokens() {
        let (service, store) = service();
        let user = service.register(register_request("a@b.com")).await.unwrap();

        let (tokens, logged_in) = service
            .login(login_request("a@b.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(logged_in.id, user.id);

        let access = service.issuer().verify_access(&tokens.access_token).unwrap();
        assert_eq!(access.user_id().unwrap(), user.id);
        assert_eq!(access.role, Some(Role::User));

        let refresh = service
            .issuer()
            .verify_refresh(&tokens.refresh_token)
            .unwrap();
        assert_eq!(refresh.user_id().unwrap(), user.id);

        assert_eq!(store.refresh_token_count(user.id), 1);
    }

    #[tokio::test]
    async fn test_login_wrong_password_rejected() {
        let (service, _) = service();
        service.register(register_request("a@b.com")).await.unwrap();

        let err = service
            .login(login_request("a@b.com", "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_rejected() {
        let (service, _) = service();
        let err = service
            .login(login_request("nobody@b.com", "secret1"))
            .await
            .unwrap_err();
        match err {
            ApiError::Authentication(message) => assert_eq!(message, "Invalid credentials"),
            other => panic!("Expected Authentication, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_concurrent_sessions_are_unlimited() {
        let (service, store) = service();
        let user = service.register(register_request("a@b.com")).await.unwrap();

        service
            .login(login_request("a@b.com", "secret1"))
            .await
            .unwrap();
        service
            .login(login_request("a@b.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(store.refresh_token_count(user.id), 2);
    }

    #[tokio::test]
    async fn test_refresh_rotates_and_invalidates_old_token() {
        let (service, store) = service();
        let user = service.register(register_request("a@b.com")).await.unwrap();
        let (tokens, _) = service
            .login(login_request("a@b.com", "secret1"))
            .await
            .unwrap();

        let rotated = service.refresh(&tokens.refresh_token).await.unwrap();
        assert_ne!(rotated.refresh_token, tokens.refresh_token);
        assert_eq!(store.refresh_token_count(user.id), 1);

        // Refresh-minted access tokens are subject-only.
        let access = service.issuer().verify_access(&rotated.access_token).unwrap();
        assert_eq!(access.role, None);

        // The rotated-out token must be unusable.
        let err = service.refresh(&tokens.refresh_token).await.unwrap_err();
        assert!(matches!(err, ApiError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_refresh_with_garbage_token_rejected() {
        let (service, _) = service();
        let err = service.refresh("not-a-jwt").await.unwrap_err();
        match err {
            ApiError::Authentication(message) => assert_eq!(message, "Invalid refresh token"),
            other => panic!("Expected Authentication, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refresh_with_foreign_signature_rejected() {
        // A structurally valid JWT signed elsewhere and force-inserted: the
        // stored row exists but signature verification must still fail.
        let (service, store) = service();
        let user = service.register(register_request("a@b.com")).await.unwrap();

        let foreign_issuer = TokenIssuer::new(&AuthConfig {
            access_secret: "other".to_string(),
            refresh_secret: "other-refresh".to_string(),
            access_ttl_secs: ACCESS_TTL_SECS,
            refresh_ttl_secs: REFRESH_TTL_SECS,
        });
        let (foreign, expires_at) = foreign_issuer.issue_refresh(user.id).unwrap();
        store
            .insert_refresh_token(NewRefreshToken {
                user_id: user.id,
                token: foreign.clone(),
                expires_at,
            })
            .await
            .unwrap();

        let err = service.refresh(&foreign).await.unwrap_err();
        assert!(matches!(err, ApiError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (service, store) = service();
        let user = service.register(register_request("a@b.com")).await.unwrap();
        let (tokens, _) = service
            .login(login_request("a@b.com", "secret1"))
            .await
            .unwrap();

        service.logout(Some(&tokens.refresh_token)).await;
        assert_eq!(store.refresh_token_count(user.id), 0);

        // Logging out again with the now-deleted token succeeds silently.
        service.logout(Some(&tokens.refresh_token)).await;
        service.logout(None).await;
    }

    #[tokio::test]
    async fn test_full_session_round_trip() {
        let (service, store) = service();
        let user = service.register(register_request("a@b.com")).await.unwrap();

        let (tokens, _) = service
            .login(login_request("a@b.com", "secret1"))
            .await
            .unwrap();
        let rotated = service.refresh(&tokens.refresh_token).await.unwrap();
        service.logout(Some(&rotated.refresh_token)).await;

        assert_eq!(store.refresh_token_count(user.id), 0);
        assert!(service.current_user(user.id).await.is_ok());
    }
}

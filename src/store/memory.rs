/**
 * In-Memory Store Implementation
 *
 * HashMap-backed implementations of `CredentialStore` and `CategoryStore`
 * enforcing the same uniqueness and rotation semantics as the PostgreSQL
 * store. Used by the test suite and useful for embedding the service
 * without a database.
 */

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::store::models::{
    Category, NewCategory, NewRefreshToken, NewUser, RefreshToken, Role, UpdateCategory, User,
};
use crate::store::{CategoryStore, CredentialStore, StoreError};

/// In-memory credential store.
///
/// Locks are never held across await points; each method takes the lock,
/// mutates, and releases, so rotation stays atomic with respect to other
/// callers just as the Postgres transaction does.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: Mutex<HashMap<Uuid, User>>,
    // Keyed by token value; the schema's unique(token) constraint.
    tokens: Mutex<HashMap<String, RefreshToken>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed user row, bypassing the USER-role default.
    ///
    /// Role assignment has no endpoint in this subsystem, so tests and
    /// embedders use this to provision ADMIN/COURIER accounts.
    pub fn seed_user(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }

    /// Number of outstanding refresh tokens for a user.
    pub fn refresh_token_count(&self, user_id: Uuid) -> usize {
        self.tokens
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.user_id == user_id)
            .count()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();

        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("User"));
        }

        let row = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            age: user.age,
            phone: user.phone,
            role: Role::User,
            created_at: Utc::now(),
        };
        users.insert(row.id, row.clone());

        Ok(row)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.get(&id).cloned())
    }

    async fn insert_refresh_token(
        &self,
        token: NewRefreshToken,
    ) -> Result<RefreshToken, StoreError> {
        let mut tokens = self.tokens.lock().unwrap();

        if tokens.contains_key(&token.token) {
            return Err(StoreError::Duplicate("Refresh token"));
        }

        let row = RefreshToken {
            id: Uuid::new_v4(),
            user_id: token.user_id,
            token: token.token,
            expires_at: token.expires_at,
            created_at: Utc::now(),
        };
        tokens.insert(row.token.clone(), row.clone());

        Ok(row)
    }

    async fn refresh_token_by_value(
        &self,
        token: &str,
    ) -> Result<Option<RefreshToken>, StoreError> {
        let tokens = self.tokens.lock().unwrap();
        Ok(tokens.get(token).cloned())
    }

    async fn rotate_refresh_token(
        &self,
        old_token: &str,
        new: NewRefreshToken,
    ) -> Result<RefreshToken, StoreError> {
        let mut tokens = self.tokens.lock().unwrap();

        if tokens.remove(old_token).is_none() {
            return Err(StoreError::RowNotFound);
        }

        let row = RefreshToken {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            token: new.token,
            expires_at: new.expires_at,
            created_at: Utc::now(),
        };
        tokens.insert(row.token.clone(), row.clone());

        Ok(row)
    }

    async fn delete_refresh_token(&self, token: &str) -> Result<bool, StoreError> {
        let mut tokens = self.tokens.lock().unwrap();
        Ok(tokens.remove(token).is_some())
    }
}

/// In-memory category store.
#[derive(Default)]
pub struct InMemoryCategoryStore {
    categories: Mutex<HashMap<Uuid, Category>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn create(&self, category: NewCategory) -> Result<Category, StoreError> {
        let mut categories = self.categories.lock().unwrap();

        if categories.values().any(|c| c.slug == category.slug) {
            return Err(StoreError::Duplicate("Category"));
        }

        let row = Category {
            id: Uuid::new_v4(),
            name: category.name,
            slug: category.slug,
            parent_id: category.parent_id,
            created_at: Utc::now(),
        };
        categories.insert(row.id, row.clone());

        Ok(row)
    }

    async fn by_id(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        let categories = self.categories.lock().unwrap();
        Ok(categories.get(&id).cloned())
    }

    async fn list(&self, parent: Option<Uuid>) -> Result<Vec<Category>, StoreError> {
        let categories = self.categories.lock().unwrap();
        let mut rows: Vec<Category> = categories
            .values()
            .filter(|c| c.parent_id == parent)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.created_at);
        Ok(rows)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: UpdateCategory,
    ) -> Result<Option<Category>, StoreError> {
        let mut categories = self.categories.lock().unwrap();

        // Existence first: a missing row is None even when the new slug
        // is taken, matching what the Postgres UPDATE reports.
        if !categories.contains_key(&id) {
            return Ok(None);
        }

        if let Some(slug) = &changes.slug {
            if categories.values().any(|c| c.id != id && &c.slug == slug) {
                return Err(StoreError::Duplicate("Category"));
            }
        }

        let Some(row) = categories.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            row.name = name;
        }
        if let Some(slug) = changes.slug {
            row.slug = slug;
        }
        if let Some(parent_id) = changes.parent_id {
            row.parent_id = Some(parent_id);
        }

        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.categories.lock().unwrap().remove(&id);
        Ok(())
    }
}

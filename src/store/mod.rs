//! Credential and Catalog Stores
//!
//! This module defines the storage seams of the backend and their two
//! implementations.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs      - Store traits and StoreError
//! ├── models.rs   - Row types and insert/update inputs
//! ├── postgres.rs - sqlx/PostgreSQL implementation
//! └── memory.rs   - In-memory implementation (tests, embedding)
//! ```
//!
//! # Guarantees
//!
//! Correctness under concurrent duplicate registration and concurrent
//! refresh rotation rests entirely on the store:
//!
//! - email uniqueness and refresh-token uniqueness are enforced here, not
//!   by check-then-insert at the call site;
//! - `rotate_refresh_token` removes the old row and inserts the new one
//!   atomically, so of two concurrent rotations of the same token exactly
//!   one succeeds.

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub use models::{
    Category, NewCategory, NewRefreshToken, NewUser, RefreshToken, Role, UpdateCategory, User,
};

/// Storage failure, mapped to `ApiError` at the service boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint was violated for the named entity.
    #[error("duplicate {0}")]
    Duplicate(&'static str),

    /// The targeted row does not exist (e.g. rotating an already-rotated
    /// refresh token).
    #[error("row not found")]
    RowNotFound,

    /// Underlying database failure.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence for user records and refresh-token records.
///
/// Refresh-token rows are exclusively owned by the store; callers hold
/// token values only transiently.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new user with role defaulted to USER.
    ///
    /// Returns `StoreError::Duplicate("User")` if the email is taken; the
    /// unique constraint is the real guard against concurrent duplicates.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn insert_refresh_token(
        &self,
        token: NewRefreshToken,
    ) -> Result<RefreshToken, StoreError>;

    async fn refresh_token_by_value(
        &self,
        token: &str,
    ) -> Result<Option<RefreshToken>, StoreError>;

    /// Atomically replace the stored row for `old_token` with `new`.
    ///
    /// Fails with `StoreError::RowNotFound` when `old_token` has no row,
    /// which is how a second concurrent rotation of the same token loses.
    async fn rotate_refresh_token(
        &self,
        old_token: &str,
        new: NewRefreshToken,
    ) -> Result<RefreshToken, StoreError>;

    /// Delete the row for `token`. Returns whether a row existed; a missing
    /// row is not an error.
    async fn delete_refresh_token(&self, token: &str) -> Result<bool, StoreError>;
}

/// Persistence for catalog categories.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Insert a category. Duplicate slugs fail with
    /// `StoreError::Duplicate("Category")`.
    async fn create(&self, category: NewCategory) -> Result<Category, StoreError>;

    async fn by_id(&self, id: Uuid) -> Result<Option<Category>, StoreError>;

    /// List categories under `parent`; `None` lists root categories.
    async fn list(&self, parent: Option<Uuid>) -> Result<Vec<Category>, StoreError>;

    /// Apply a partial update. Returns `None` when the id does not exist.
    /// `None` fields keep their stored value, so `parent_id` can be
    /// re-pointed but never cleared back to root here.
    async fn update(
        &self,
        id: Uuid,
        changes: UpdateCategory,
    ) -> Result<Option<Category>, StoreError>;

    /// Delete by id; deleting a missing row is a no-op.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/**
 * PostgreSQL Store Implementation
 *
 * sqlx-backed implementations of `CredentialStore` and `CategoryStore`.
 * Unique-constraint violations are detected via the database error class
 * and surfaced as `StoreError::Duplicate`; refresh rotation runs in a
 * single transaction.
 */

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::models::{
    Category, NewCategory, NewRefreshToken, NewUser, RefreshToken, UpdateCategory, User,
};
use crate::store::{CategoryStore, CredentialStore, StoreError};

const USER_COLUMNS: &str = "id, email, password_hash, name, age, phone, role, created_at";
const TOKEN_COLUMNS: &str = "id, user_id, token, expires_at, created_at";
const CATEGORY_COLUMNS: &str = "id, name, slug, parent_id, created_at";

/// Map a unique-constraint violation to `Duplicate`, anything else to
/// `Database`.
fn map_unique(err: sqlx::Error, entity: &'static str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate(entity),
        _ => StoreError::Database(err),
    }
}

/// Credential store backed by PostgreSQL.
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (email, password_hash, name, age, phone) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .bind(user.age)
            .bind(&user.phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique(e, "User"))
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn insert_refresh_token(
        &self,
        token: NewRefreshToken,
    ) -> Result<RefreshToken, StoreError> {
        let query = format!(
            "INSERT INTO refresh_tokens (user_id, token, expires_at) \
             VALUES ($1, $2, $3) \
             RETURNING {TOKEN_COLUMNS}"
        );

        sqlx::query_as::<_, RefreshToken>(&query)
            .bind(token.user_id)
            .bind(&token.token)
            .bind(token.expires_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique(e, "Refresh token"))
    }

    async fn refresh_token_by_value(
        &self,
        token: &str,
    ) -> Result<Option<RefreshToken>, StoreError> {
        let query = format!("SELECT {TOKEN_COLUMNS} FROM refresh_tokens WHERE token = $1");

        let row = sqlx::query_as::<_, RefreshToken>(&query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn rotate_refresh_token(
        &self,
        old_token: &str,
        new: NewRefreshToken,
    ) -> Result<RefreshToken, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Delete-first: if the row is already gone a concurrent rotation
        // won, and this call must fail instead of minting a second pair.
        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(old_token)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(StoreError::RowNotFound);
        }

        let query = format!(
            "INSERT INTO refresh_tokens (user_id, token, expires_at) \
             VALUES ($1, $2, $3) \
             RETURNING {TOKEN_COLUMNS}"
        );

        let row = sqlx::query_as::<_, RefreshToken>(&query)
            .bind(new.user_id)
            .bind(&new.token)
            .bind(new.expires_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_unique(e, "Refresh token"))?;

        tx.commit().await?;

        Ok(row)
    }

    async fn delete_refresh_token(&self, token: &str) -> Result<bool, StoreError> {
        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(deleted.rows_affected() > 0)
    }
}

/// Category store backed by PostgreSQL.
#[derive(Clone)]
pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn create(&self, category: NewCategory) -> Result<Category, StoreError> {
        let query = format!(
            "INSERT INTO categories (name, slug, parent_id) \
             VALUES ($1, $2, $3) \
             RETURNING {CATEGORY_COLUMNS}"
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(&category.name)
            .bind(&category.slug)
            .bind(category.parent_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique(e, "Category"))
    }

    async fn by_id(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    async fn list(&self, parent: Option<Uuid>) -> Result<Vec<Category>, StoreError> {
        let rows = match parent {
            Some(parent_id) => {
                let query = format!(
                    "SELECT {CATEGORY_COLUMNS} FROM categories \
                     WHERE parent_id = $1 ORDER BY created_at"
                );
                sqlx::query_as::<_, Category>(&query)
                    .bind(parent_id)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = format!(
                    "SELECT {CATEGORY_COLUMNS} FROM categories \
                     WHERE parent_id IS NULL ORDER BY created_at"
                );
                sqlx::query_as::<_, Category>(&query)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: UpdateCategory,
    ) -> Result<Option<Category>, StoreError> {
        let query = format!(
            "UPDATE categories SET \
                name = COALESCE($2, name), \
                slug = COALESCE($3, slug), \
                parent_id = COALESCE($4, parent_id) \
             WHERE id = $1 \
             RETURNING {CATEGORY_COLUMNS}"
        );

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(changes.name)
            .bind(changes.slug)
            .bind(changes.parent_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique(e, "Category"))?;

        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

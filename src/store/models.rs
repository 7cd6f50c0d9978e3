/**
 * Persistent Data Models
 *
 * Row types for the credential store (users, refresh tokens) and the
 * category catalog, plus the insert/update inputs the stores accept.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User role, a closed set fixed at the schema level.
///
/// Roles are immutable through this subsystem: no endpoint mutates them,
/// and registration always produces `User`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, sqlx::Type,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "role", rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
    Courier,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::Courier => "COURIER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User struct representing a user row in the database
///
/// The password hash never leaves the server: it is skipped on
/// serialization, and response types are built from the other fields.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// User email address (unique, case-sensitive as stored)
    pub email: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name
    pub name: String,
    /// Age (13-120, checked at the handler boundary)
    pub age: i32,
    /// Phone number
    pub phone: String,
    /// Role (defaults to USER on insert)
    pub role: Role,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user. The store assigns id, role, and timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub age: i32,
    pub phone: String,
}

/// A stored refresh credential.
///
/// Each row is exactly one outstanding refresh token; rotation removes the
/// old row in the same transaction that inserts the new one.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a refresh token row.
#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Catalog category row. `name` is a localized JSON object.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: serde_json::Value,
    pub slug: String,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: serde_json::Value,
    pub slug: String,
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<Uuid>,
}

/// Partial update for a category; `None` fields are left untouched.
///
/// Because `None` means "keep", a category cannot be detached back to
/// root through an update: `parentId: null` and an absent `parentId`
/// deserialize identically. Re-rooting takes a delete and re-create.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateCategory {
    pub name: Option<serde_json::Value>,
    pub slug: Option<String>,
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_role_default_is_user() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_role_serde_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Courier).unwrap(), "\"COURIER\"");
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_user_serialization_omits_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            name: "John Doe".to_string(),
            age: 20,
            phone: "+123456789012".to_string(),
            role: Role::User,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["role"], "USER");
    }
}

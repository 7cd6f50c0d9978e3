/**
 * Request and Response Types
 *
 * JSON shapes for the authentication endpoints. Registration input
 * contract: name >= 2 chars, age 13-120, email with '@', password >= 6
 * chars, phone 10-15 chars.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::store::{Role, User};

/// Registration request body
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub age: i32,
    pub email: String,
    pub password: String,
    pub phone: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.len() < 2 {
            return Err(ApiError::validation("Name must be at least 2 characters"));
        }
        if !(13..=120).contains(&self.age) {
            return Err(ApiError::validation("Age must be between 13 and 120"));
        }
        if !self.email.contains('@') {
            return Err(ApiError::validation("Invalid email format"));
        }
        if self.password.len() < 6 {
            return Err(ApiError::validation(
                "Password must be at least 6 characters",
            ));
        }
        if self.phone.len() < 10 || self.phone.len() > 15 {
            return Err(ApiError::validation("Phone must be 10-15 characters"));
        }
        Ok(())
    }
}

/// Login request body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Sanitized user projection returned by auth endpoints (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub age: i32,
    pub phone: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            age: user.age,
            phone: user.phone,
            role: user.role,
        }
    }
}

/// Response body for register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Plain message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

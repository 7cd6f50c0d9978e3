//! Authentication Module
//!
//! This module implements the authentication and session-lifecycle
//! subsystem: credential registration, login, access/refresh token
//! issuance, token rotation, and logout.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs      - Module exports
//! ├── password.rs - bcrypt hashing and verification
//! ├── tokens.rs   - JWT access/refresh issuance and verification
//! ├── service.rs  - SessionService orchestration
//! ├── cookies.rs  - Session cookie builders
//! └── handlers/   - HTTP handlers for the auth endpoints
//! ```
//!
//! # Session Flow
//!
//! 1. **Register**: credentials validated, password hashed, user stored
//!    with role USER. No tokens are issued.
//! 2. **Login**: hash verified, access token (15 m, sub + role) and
//!    refresh token (7 d, sub) issued; the refresh token is persisted and
//!    both travel back as httpOnly cookies.
//! 3. **Refresh**: stored row + signature verified, then the row is
//!    atomically replaced with a fresh pair; the old token is dead from
//!    that instant.
//! 4. **Logout**: the stored row is removed; repeat logouts are no-ops.
//!
//! # Security
//!
//! - Passwords are bcrypt-hashed before storage and never logged
//! - Unknown email and wrong password are indistinguishable (401)
//! - Access and refresh tokens use separate signing secrets
//! - Refresh tokens are single-use per rotation

pub mod cookies;
pub mod handlers;
pub mod password;
pub mod service;
pub mod tokens;

// Re-export commonly used types and handlers
pub use handlers::types::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest, UserResponse};
pub use handlers::{get_me, login, logout, refresh_token, register};
pub use service::{SessionService, SessionTokens};
pub use tokens::{AuthConfig, TokenIssuer};

//! API Error Module
//!
//! This module defines the error taxonomy used across handlers, middleware,
//! and services, and the conversion of those errors into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Taxonomy
//!
//! - `Validation` - malformed input (400)
//! - `Authentication` - missing/invalid/expired credential or token (401)
//! - `Authorization` - authenticated but insufficient role (403)
//! - `NotFound` - referenced entity absent (404)
//! - `Conflict` - duplicate unique key (409)
//! - `Internal` - anything the caller must not see in detail (500)
//!
//! Handlers never leak store-level errors directly; `StoreError` is mapped to
//! one of the variants above at the service boundary, and server-side detail
//! is logged rather than returned to the client.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;

//! Server Module
//!
//! Server-side wiring for the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Configuration loading from the environment
//! └── init.rs         - Database connection and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: resolve database URL, port and signing keys
//! 2. **Database Connection**: create the pool and run migrations
//! 3. **State Creation**: build stores, token issuer and session service
//! 4. **Router Creation**: configure all routes and middleware

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::AppConfig;
pub use init::create_app;
pub use state::AppState;

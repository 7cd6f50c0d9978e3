//! Route Configuration Module
//!
//! Configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports
//! ├── router.rs       - Router assembly and middleware layers
//! └── api_routes.rs   - API route table and gate placement
//! ```

/// Main router creation
pub mod router;

/// API endpoint route table
pub mod api_routes;

pub use router::create_router;

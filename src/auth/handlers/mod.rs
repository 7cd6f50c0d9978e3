//! HTTP handlers for the authentication endpoints
//!
//! One file per endpoint, plus the shared request/response types:
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Handler exports
//! ├── types.rs    - Request/response types
//! ├── register.rs - POST /api/auth/register
//! ├── login.rs    - POST /api/auth/login
//! ├── refresh.rs  - GET  /api/auth/refresh-token
//! ├── logout.rs   - GET  /api/auth/logout
//! └── me.rs       - GET  /api/auth/me
//! ```

pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;
pub mod types;

pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use refresh::refresh_token;
pub use register::register;

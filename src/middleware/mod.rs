/**
 * Middleware Module
 *
 * Request gates applied at the routing layer.
 */

pub mod auth;

pub use auth::{require_auth, require_role, Principal};

/**
 * Password Hashing
 *
 * bcrypt wrappers for the one-way salted hash and its verify operation.
 * Plaintext passwords only ever exist in request scope; nothing here logs
 * or stores them.
 */

use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a plaintext password with bcrypt.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// Comparison is constant-time via bcrypt.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, password_hash)
}

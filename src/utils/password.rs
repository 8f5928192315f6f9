//! Credential verification against stored bcrypt hashes.
//!
//! Plaintext secrets are never logged and never travel beyond these two
//! functions; a wrong password is a `false` return, not an error.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::utils::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow::anyhow!("failed to hash password: {e}")))
}

/// Returns `Ok(false)` on mismatch; errors only when the stored hash itself
/// is corrupt.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    verify(password, stored_hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("failed to verify password: {e}")))
}

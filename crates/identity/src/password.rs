//! Password hashing
//!
//! Argon2id with default parameters and a fresh random salt per call, so
//! hashing the same password twice gives two different PHC strings.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to hash password: {0}")]
pub struct PasswordError(String);

/// Hash a plaintext password into a PHC-format string
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| PasswordError(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check an attempt against a stored hash.
///
/// A malformed stored hash is treated as a mismatch.
pub fn verify_password(hash: &str, attempt: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(attempt.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

// ============================
// crates/gatehouse-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use crate::error::AppError;
use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Scrypt,
};

/// Hash a password using scrypt.
///
/// The salt is generated from OS entropy and embedded in the returned PHC
/// string, so verification needs only the stored blob and the candidate
/// password.
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| AppError::Hash(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// Verify a password against a stored hash.
///
/// A malformed stored hash verifies as `false` rather than erroring: from the
/// caller's point of view it is simply a credential that cannot match.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok()
}

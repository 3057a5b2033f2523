//! # Password Hashing
//!
//! Argon2id hashing for the `users.password` column.
//!
//! - [`hash_password`] salts with [`OsRng`] and returns a PHC string
//!   (`$argon2id$v=19$m=19456,t=2,p=1$...`).
//! - [`verify_password`] returns `Ok(false)` on mismatch and `Err` only when
//!   the stored string is not a valid PHC hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::DbResult;

/// Hashes a password using Argon2id with a fresh random salt.
pub fn hash_password(password: &str) -> DbResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash string.
pub fn verify_password(password: &str, stored: &str) -> DbResult<bool> {
    let parsed = PasswordHash::new(stored)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("pw1").unwrap();
        assert_ne!(hash, "pw1");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("pw1", &hash).unwrap());
        assert!(!verify_password("pw2", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salt() {
        let a = hash_password("pw1").unwrap();
        let b = hash_password("pw1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(verify_password("pw1", "pw1").is_err());
    }
}

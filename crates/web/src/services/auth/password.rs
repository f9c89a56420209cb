//! Password hashing behind a capability trait.
//!
//! Production code uses Argon2id; tests can swap in a deterministic stub.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
};
use thiserror::Error;

/// Opaque failure from the hashing backend.
#[derive(Debug, Error)]
#[error("password hashing error")]
pub struct PasswordHashError;

/// Capability for one-way, salted password hashing.
///
/// `verify` reports a mismatch as `Ok(false)`; `Err` means the backend
/// itself failed (e.g. a stored hash that cannot be parsed).
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing hash string.
    ///
    /// # Errors
    ///
    /// Returns `PasswordHashError` if the backend fails.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns `PasswordHashError` if the stored hash cannot be parsed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}

/// Argon2id hasher used in production.
///
/// Produces PHC-format strings; the salt is generated per call, so the same
/// password never hashes to the same string twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| PasswordHashError)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordHashError)?;
        let argon2 = Argon2::default();

        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(PasswordHashError),
        }
    }
}

/// Deterministic stub for tests; prefixes instead of hashing.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PlainTextHasher;

#[cfg(test)]
impl PasswordHasher for PlainTextHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        Ok(hash == format!("plain:{password}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_argon2_hash_and_verify_roundtrip() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("admin").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("admin", &hash).unwrap());
        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = Argon2PasswordHasher;
        let first = hasher.hash("admin").unwrap();
        let second = hasher.hash("admin").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let hasher = Argon2PasswordHasher;
        assert!(hasher.verify("admin", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_plain_text_stub() {
        let hasher = PlainTextHasher;
        let hash = hasher.hash("pw").unwrap();
        assert_eq!(hash, "plain:pw");
        assert!(hasher.verify("pw", &hash).unwrap());
        assert!(!hasher.verify("other", &hash).unwrap());
    }
}

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;
use super::record::PasswordRecord;

/// Password hashing implementation.
///
/// Argon2id with the crate's default cost parameters. Both operations are
/// CPU-bound; async callers should run them on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a freshly generated salt.
    ///
    /// Hashing the same input twice yields two different records, both of
    /// which verify against that input.
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, password: &str) -> Result<PasswordRecord, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordRecord::from_hash(hash.to_string()))
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored record.
    ///
    /// Recomputes the digest with the salt and parameters embedded in `record`;
    /// the final comparison is constant-time. Returns `false` for a wrong
    /// password and for any record that does not parse as a PHC string.
    pub fn verify(&self, password: &str, record: &PasswordRecord) -> bool {
        let parsed_hash = match PasswordHash::new(record.as_str()) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password record is malformed");
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

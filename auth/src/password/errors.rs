use thiserror::Error;

/// Error type for password hashing.
///
/// Verification never fails with an error: a malformed stored record simply
/// does not verify.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

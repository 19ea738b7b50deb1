use std::fmt;

/// Stored one-way digest of a user's password.
///
/// Holds a PHC string (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`), so the
/// algorithm, parameters and salt travel with the digest.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordRecord(String);

impl PasswordRecord {
    /// Wrap a digest loaded from storage.
    ///
    /// No validation happens here; a malformed value is rejected at verify time.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Get the PHC string for persistence.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordRecord(<redacted>)")
    }
}

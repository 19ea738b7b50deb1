use async_trait::async_trait;
use thiserror::Error;

use crate::password::PasswordRecord;

/// Stored account as seen by the gate.
pub trait UserRecord {
    /// Login identifier (email); also the token subject.
    fn identifier(&self) -> &str;

    fn password_record(&self) -> &PasswordRecord;
}

/// Error for directory lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("User lookup failed: {0}")]
    LookupFailed(String),
}

/// Read-only lookup of user records, supplied by the hosting service.
///
/// The gate never writes through this trait.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    type Record: UserRecord + Send + Sync;

    /// Find the record whose login identifier equals `identifier`.
    ///
    /// # Returns
    /// Optional record (None if no such user)
    ///
    /// # Errors
    /// * `LookupFailed` - Backing store could not be queried
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Self::Record>, DirectoryError>;
}

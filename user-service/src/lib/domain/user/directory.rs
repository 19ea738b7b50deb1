use std::sync::Arc;

use async_trait::async_trait;
use auth::DirectoryError;
use auth::UserDirectory;

use crate::domain::user::models::User;
use crate::user::ports::UserRepository;

/// Exposes the user repository to the auth gate, keyed by email.
pub struct RepositoryUserDirectory<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> RepositoryUserDirectory<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<UR> UserDirectory for RepositoryUserDirectory<UR>
where
    UR: UserRepository,
{
    type Record = User;

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, DirectoryError> {
        self.repository
            .find_by_email(identifier)
            .await
            .map_err(|e| DirectoryError::LookupFailed(e.to_string()))
    }
}

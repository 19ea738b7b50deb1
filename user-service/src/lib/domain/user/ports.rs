use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Pagination;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create new user with validated credentials.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, password and names
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already taken
    /// * `EmailTaken` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `Storage` - Persistence layer failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Storage` - Persistence layer failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// List users ordered by creation time.
    ///
    /// # Arguments
    /// * `pagination` - Offset and page size
    ///
    /// # Errors
    /// * `Storage` - Persistence layer failed
    async fn list_users(&self, pagination: Pagination) -> Result<Vec<User>, UserError>;

    /// Update existing user with optional fields.
    ///
    /// A new password is re-hashed before storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameTaken` - New username is already taken
    /// * `EmailTaken` - New email is already registered
    /// * `Storage` - Persistence layer failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Storage` - Persistence layer failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already taken
    /// * `EmailTaken` - Email is already registered
    /// * `Storage` - Persistence layer failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Persistence layer failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Persistence layer failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Arguments
    /// * `email` - Email address string, compared exactly
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Persistence layer failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve a page of users ordered by creation time.
    ///
    /// # Errors
    /// * `Storage` - Persistence layer failed
    async fn list(&self, pagination: Pagination) -> Result<Vec<User>, UserError>;

    /// Update existing user in storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameTaken` - New username is already taken
    /// * `EmailTaken` - New email is already registered
    /// * `Storage` - Persistence layer failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Storage` - Persistence layer failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}

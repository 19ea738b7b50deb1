use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("user id is not a UUID: {0}")]
    NotAUuid(String),
}

/// Rejections from `Username::new`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("username needs at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("username allows at most {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("username may only contain letters, digits, '_' and '-'")]
    InvalidCharacters,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("not a valid email address: {0}")]
    Rejected(String),
}

/// Failures of account management.
///
/// Value-object errors convert in with `?`; `Storage` and `Internal` are
/// reported to clients as a generic 500.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password could not be stored: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("No user with id {0}")]
    NotFound(String),

    #[error("Username {0} is already taken")]
    UsernameTaken(String),

    #[error("Email {0} is already registered")]
    EmailTaken(String),

    /// Caller may not modify this account
    #[error("Not allowed to modify user {0}")]
    Forbidden(String),

    #[error("User store failure: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Internal(err.to_string())
    }
}

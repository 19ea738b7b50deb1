use std::sync::Arc;

use chrono::Duration;
use thiserror::Error;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::config::AuthConfig;
use crate::directory::DirectoryError;
use crate::directory::UserDirectory;
use crate::directory::UserRecord;
use crate::password::PasswordHasher;
use crate::password::PasswordRecord;
use crate::token::EncodeError;
use crate::token::Token;
use crate::token::TokenCodec;

/// Authentication failures returned to the hosting service.
///
/// `InvalidCredentials` and `Unauthorized` carry fixed messages so callers
/// cannot tell which check failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("User directory unavailable: {0}")]
    Directory(String),

    #[error("Authentication failed: {0}")]
    Internal(String),
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        tracing::error!(error = %err, "User directory lookup failed");
        AuthError::Directory(err.to_string())
    }
}

impl From<EncodeError> for AuthError {
    fn from(err: EncodeError) -> Self {
        tracing::error!(error = %err, "Token issuance failed");
        AuthError::Internal(err.to_string())
    }
}

/// Authentication coordinator.
///
/// Combines directory lookup, password verification and token handling into
/// the two request-level operations: `login` and `authorize`. Holds no
/// mutable state; share it behind an `Arc`.
pub struct AuthGate<D>
where
    D: UserDirectory + ?Sized,
{
    directory: Arc<D>,
    codec: TokenCodec,
    password_hasher: PasswordHasher,
    clock: Arc<dyn Clock>,
    token_ttl: Duration,
}

impl<D> AuthGate<D>
where
    D: UserDirectory + ?Sized,
{
    /// Create a gate reading the wall clock.
    ///
    /// # Arguments
    /// * `directory` - User lookup implementation
    /// * `config` - Validated signing secret and token lifetime
    pub fn new(directory: Arc<D>, config: &AuthConfig) -> Self {
        Self::with_clock(directory, config, Arc::new(SystemClock))
    }

    /// Create a gate with an explicit time source.
    pub fn with_clock(directory: Arc<D>, config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            directory,
            codec: TokenCodec::new(config),
            password_hasher: PasswordHasher::new(),
            clock,
            token_ttl: config.token_ttl(),
        }
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `identifier` - Login identifier (email)
    /// * `secret` - Plaintext password
    ///
    /// # Returns
    /// Token whose subject is the stored identifier
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identifier or wrong password
    /// * `Directory` - Lookup failed
    /// * `Internal` - Token could not be issued
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<Token, AuthError> {
        let Some(record) = self.directory.find_by_identifier(identifier).await? else {
            tracing::info!(reason = "unknown identifier", "Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.verify_password(secret, record.password_record()).await? {
            tracing::info!(reason = "password mismatch", "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .codec
            .encode(record.identifier(), self.clock.now(), self.token_ttl)?;

        tracing::debug!(expires_at = %token.expires_at(), "Token issued");

        Ok(token)
    }

    /// Resolve a bearer token to the user it was issued for.
    ///
    /// # Arguments
    /// * `token` - Compact token string, without the `Bearer ` prefix
    ///
    /// # Returns
    /// Current directory record of the token subject
    ///
    /// # Errors
    /// * `Unauthorized` - Token malformed, forged, expired, subject-less, or user gone
    /// * `Directory` - Lookup failed
    pub async fn authorize(&self, token: &str) -> Result<D::Record, AuthError> {
        let subject = self.codec.decode(token, self.clock.now()).map_err(|e| {
            tracing::warn!(reason = %e, "Bearer token rejected");
            AuthError::Unauthorized
        })?;

        self.directory
            .find_by_identifier(&subject)
            .await?
            .ok_or_else(|| {
                tracing::warn!(reason = "user no longer exists", "Bearer token rejected");
                AuthError::Unauthorized
            })
    }

    async fn verify_password(
        &self,
        secret: &str,
        record: &PasswordRecord,
    ) -> Result<bool, AuthError> {
        let hasher = self.password_hasher;
        let secret = secret.to_string();
        let record = record.clone();

        tokio::task::spawn_blocking(move || hasher.verify(&secret, &record))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))
    }
}

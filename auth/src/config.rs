use std::fmt;

use chrono::Duration;
use thiserror::Error;

/// Error for invalid authentication configuration.
///
/// Raised once at startup; a process holding one of these must not serve traffic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthConfigError {
    #[error("Token secret too short: minimum {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },

    #[error("Token lifetime must be positive, got {0} seconds")]
    NonPositiveTtl(i64),
}

/// Immutable signing secret and token lifetime.
///
/// Built once from loaded settings and handed to the codec and gate.
#[derive(Clone)]
pub struct AuthConfig {
    secret: Vec<u8>,
    token_ttl: Duration,
}

impl AuthConfig {
    /// HS256 keys shorter than the hash output weaken the MAC.
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Validate and build the configuration.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing key
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `SecretTooShort` - Secret shorter than 32 bytes
    /// * `NonPositiveTtl` - Lifetime is zero or negative
    pub fn new(secret: &[u8], token_ttl: Duration) -> Result<Self, AuthConfigError> {
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(AuthConfigError::SecretTooShort {
                min: Self::MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        if token_ttl <= Duration::zero() {
            return Err(AuthConfigError::NonPositiveTtl(token_ttl.num_seconds()));
        }

        Ok(Self {
            secret: secret.to_vec(),
            token_ttl,
        })
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

//! Authentication core
//!
//! Provides the credential-verification subsystem used by the user service:
//! - Password hashing (Argon2id)
//! - Signed, expiring identity tokens (HS256 JWT)
//! - The gate that turns credentials into a token and a token back into a user
//!
//! Storage stays outside: the hosting service implements [`UserDirectory`]
//! and hands it to [`AuthGate`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let record = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &record));
//! assert!(!hasher.verify("not_my_password", &record));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{AuthConfig, TokenCodec};
//! use chrono::{Duration, Utc};
//!
//! let config = AuthConfig::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(30)).unwrap();
//! let codec = TokenCodec::new(&config);
//!
//! let now = Utc::now();
//! let token = codec.encode("alice@example.com", now, config.token_ttl()).unwrap();
//! assert_eq!(codec.decode(token.as_str(), now).unwrap(), "alice@example.com");
//! ```

pub mod clock;
pub mod config;
pub mod directory;
pub mod gate;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use config::AuthConfig;
pub use config::AuthConfigError;
pub use directory::DirectoryError;
pub use directory::UserDirectory;
pub use directory::UserRecord;
pub use gate::AuthError;
pub use gate::AuthGate;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordRecord;
pub use token::DecodeError;
pub use token::EncodeError;
pub use token::Token;
pub use token::TokenCodec;

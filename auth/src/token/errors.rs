use thiserror::Error;

/// Reasons a presented token is rejected, in the order they are checked.
///
/// Callers outside the core must not surface which variant occurred; it is
/// meant for logs only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Token is malformed: {0}")]
    MalformedToken(String),

    #[error("Token signature does not verify")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token has no subject")]
    MissingSubject,
}

/// Error type for token issuance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token expiry is out of range")]
    ExpiryOutOfRange,
}

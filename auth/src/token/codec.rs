use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::SubsecRound;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::DecodeError;
use super::errors::EncodeError;
use crate::config::AuthConfig;

/// Signed bearer token handed to a client after login.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    value: String,
    subject: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Token {
    /// Compact `header.payload.signature` form sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("subject", &self.subject)
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Encodes and verifies HS256 identity tokens.
///
/// Expiry is checked against the `now` supplied by the caller rather than the
/// library's own clock, so the gate decides what time it is.
pub struct TokenCodec {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec keyed with the configured secret.
    pub fn new(config: &AuthConfig) -> Self {
        let algorithm = Algorithm::HS256;

        let mut validation = Validation::new(algorithm);
        // Expiry and subject are checked by `decode` itself, in a fixed order.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            header: Header::new(algorithm),
            encoding_key: EncodingKey::from_secret(config.secret()),
            decoding_key: DecodingKey::from_secret(config.secret()),
            validation,
        }
    }

    /// Mint a token for `subject` valid from `now` for `ttl`.
    ///
    /// Deterministic: the same subject, instant, lifetime and secret always
    /// produce the same string. Timestamps are truncated to whole seconds.
    ///
    /// # Errors
    /// * `ExpiryOutOfRange` - `now + ttl` overflows
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode(
        &self,
        subject: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Token, EncodeError> {
        // Reported instants must equal the signed NumericDates.
        let issued_at = now.trunc_subsecs(0);
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(EncodeError::ExpiryOutOfRange)?
            .trunc_subsecs(0);

        let claims = Claims::new(subject, issued_at.timestamp(), expires_at.timestamp());

        let value = encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

        Ok(Token {
            value,
            subject: subject.to_string(),
            issued_at,
            expires_at,
        })
    }

    /// Verify a token and return its subject.
    ///
    /// Checks run in order: structure, signature, expiry (`now >= exp` is
    /// expired), subject.
    ///
    /// # Errors
    /// * `MalformedToken` - Not three base64url parts, unsupported header, or unreadable payload
    /// * `InvalidSignature` - MAC does not match the server secret
    /// * `Expired` - Token expiry has been reached, or no expiry present
    /// * `MissingSubject` - `sub` claim absent or empty
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<String, DecodeError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => DecodeError::InvalidSignature,
                    _ => DecodeError::MalformedToken(e.to_string()),
                }
            })?;

        let claims = token_data.claims;

        if claims.is_expired(now.timestamp()) {
            return Err(DecodeError::Expired);
        }

        claims
            .subject()
            .map(str::to_string)
            .ok_or(DecodeError::MissingSubject)
    }
}

use serde::Deserialize;
use serde::Serialize;

/// Payload of an identity token.
///
/// Only the registered claims the service issues are modelled; unknown
/// fields in a verified payload are ignored. All fields are optional on the
/// way in so that a signed-but-incomplete payload reaches the expiry and
/// subject checks instead of failing as malformed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user email)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn new(subject: impl ToString, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: Some(subject.to_string()),
            iat: Some(issued_at),
            exp: Some(expires_at),
        }
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// The expiry instant itself counts as expired. A payload without `exp`
    /// can never be shown to be live, so it is expired too.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| current_timestamp >= exp)
    }

    /// Non-empty subject, if any.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|sub| !sub.is_empty())
    }
}

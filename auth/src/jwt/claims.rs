use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an issued token.
///
/// Every field is required: tokens are only ever built by `TokenService`,
/// which stamps issuer, audience and timestamps from its own configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Email address of the subject
    pub email: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Check if the token is expired.
    ///
    /// A token is expired at and after its expiry instant: one valid until
    /// instant T is already expired at T.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Minimum signing key length in bytes for HS256.
pub const MIN_KEY_LEN: usize = 32;

/// Token issuer and validator.
///
/// Holds the symmetric signing key (fixed at construction, immutable
/// thereafter), the issuer and audience stamped on every issued token, and
/// the token lifetime. Tokens are signed with HS256; signature comparison
/// happens in constant time inside the library.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing key, at least 32 bytes
    /// * `issuer` - Issuer claim required of every accepted token
    /// * `audience` - Audience claim required of every accepted token
    /// * `lifetime_hours` - Hours until an issued token expires
    ///
    /// # Returns
    /// TokenService configured for HS256
    ///
    /// # Errors
    /// * `KeyTooShort` - The signing key has fewer than 32 bytes
    /// * `NonPositiveLifetime` - `lifetime_hours` is zero or negative
    pub fn new(
        secret: &[u8],
        issuer: impl Into<String>,
        audience: impl Into<String>,
        lifetime_hours: i64,
    ) -> Result<Self, TokenError> {
        if secret.len() < MIN_KEY_LEN {
            return Err(TokenError::KeyTooShort(MIN_KEY_LEN));
        }
        if lifetime_hours <= 0 {
            return Err(TokenError::NonPositiveLifetime);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: issuer.into(),
            audience: audience.into(),
            lifetime: Duration::hours(lifetime_hours),
        })
    }

    /// Issue a signed token for a subject.
    ///
    /// # Arguments
    /// * `subject` - User identifier stored in the `sub` claim
    /// * `email` - Email address stored in the `email` claim
    ///
    /// # Returns
    /// Compact `header.payload.signature` token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims serialization or signing failed
    pub fn issue(&self, subject: &str, email: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            email: email.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and return its claims.
    ///
    /// Checks the signature, the issuer, the audience, and that the current
    /// time is strictly before the expiry instant, with zero leeway. Every
    /// failing check maps to the same `Invalid` error; the underlying cause
    /// is recorded in the debug log only.
    ///
    /// # Arguments
    /// * `token` - Compact token string to validate
    ///
    /// # Returns
    /// The verified claims
    ///
    /// # Errors
    /// * `Invalid` - Malformed, tampered, mis-issued or expired token
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Token validation failed");
            TokenError::Invalid
        })?;

        // jsonwebtoken accepts a token through its expiry second; here a
        // token is already expired at the expiry instant.
        let claims = token_data.claims;
        if claims.is_expired(Utc::now().timestamp()) {
            tracing::debug!("Token validation failed: expired");
            return Err(TokenError::Invalid);
        }

        Ok(claims)
    }
}

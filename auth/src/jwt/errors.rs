use thiserror::Error;

/// Error type for token operations.
///
/// Validation failures all collapse into the single `Invalid` variant so a
/// caller cannot tell a bad signature from an expired or mis-issued token.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid")]
    Invalid,

    #[error("Signing key must be at least {0} bytes")]
    KeyTooShort(usize),

    #[error("Token lifetime must be positive")]
    NonPositiveLifetime,
}

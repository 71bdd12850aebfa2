use thiserror::Error;

/// Error type for password operations.
///
/// Verification never errors: malformed stored credentials resolve to a
/// plain mismatch.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

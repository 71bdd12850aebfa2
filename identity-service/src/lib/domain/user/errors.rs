use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for request field validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Top-level error for all authentication operations.
///
/// The credential and token variants carry deliberately generic messages;
/// they never reveal which check failed.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Request validation errors (automatically converted via #[from])
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // Domain-level errors
    #[error("User with this email already exists")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("No token provided")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Hashing(#[from] auth::PasswordError),

    #[error("Token issuance failed: {0}")]
    TokenIssue(String),

    #[error("Store error: {0}")]
    Store(String),
}

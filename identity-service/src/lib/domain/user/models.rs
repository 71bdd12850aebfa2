use std::fmt;

use uuid::Uuid;

use crate::user::errors::UserIdError;
use crate::user::errors::ValidationError;

/// User aggregate entity.
///
/// Represents a registered account
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Kept exactly as supplied; the only requirement is a non-blank value.
/// Store lookups treat addresses as case-sensitive keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// EmailAddress value object
    ///
    /// # Errors
    /// * `MissingField` - Value is empty or whitespace-only
    pub fn new(email: String) -> Result<Self, ValidationError> {
        if email.trim().is_empty() {
            Err(ValidationError::MissingField("Email"))
        } else {
            Ok(Self(email))
        }
    }

    /// Get email as string slice.
    ///
    /// # Returns
    /// Email string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Require a non-blank request field.
///
/// # Arguments
/// * `field` - Field name used in the error message
/// * `value` - Raw field value
///
/// # Returns
/// The value unchanged
///
/// # Errors
/// * `MissingField` - Value is empty or whitespace-only
pub fn require_field(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(value)
    }
}

/// Command to register a new user with validated fields
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    /// * `first_name` - User's first name
    /// * `last_name` - User's last name
    ///
    /// # Returns
    /// RegisterCommand with validated fields
    pub fn new(
        email: EmailAddress,
        password: String,
        first_name: String,
        last_name: String,
    ) -> Self {
        Self {
            email,
            password,
            first_name,
            last_name,
        }
    }
}

/// Command to authenticate an existing user
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Successful authentication outcome: an issued token plus the user it
/// belongs to. The stored credential never leaves the domain layer.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub token: String,
    pub user: User,
}

/// Identity asserted by a validated token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: UserId,
    pub email: String,
}

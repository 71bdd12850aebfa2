use async_trait::async_trait;

use crate::domain::user::models::Authenticated;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenIdentity;
use crate::domain::user::models::User;
use crate::user::errors::AuthError;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and issue a token for it.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email, password and names
    ///
    /// # Returns
    /// Issued token plus the created user
    ///
    /// # Errors
    /// * `EmailTaken` - Email is already registered
    /// * `Hashing` - Credential hashing failed
    /// * `TokenIssue` - Token signing failed
    /// * `Store` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Authenticated, AuthError>;

    /// Authenticate an existing user and issue a token for it.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and password
    ///
    /// # Returns
    /// Issued token plus the matched user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, never
    ///   distinguished
    /// * `TokenIssue` - Token signing failed
    /// * `Store` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<Authenticated, AuthError>;

    /// Validate a token taken from an Authorization header value.
    ///
    /// Accepts the raw token with or without a `Bearer ` prefix.
    ///
    /// # Arguments
    /// * `header_value` - Authorization header value, possibly empty
    ///
    /// # Returns
    /// Identity asserted by the token
    ///
    /// # Errors
    /// * `MissingToken` - No token present in the header value
    /// * `InvalidToken` - Malformed, tampered, mis-issued or expired token
    fn validate_token(&self, header_value: &str) -> Result<TokenIdentity, AuthError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// The insert is atomic with respect to the email uniqueness check:
    /// two concurrent inserts with the same email resolve to exactly one
    /// success and one conflict.
    ///
    /// # Arguments
    /// * `user` - User entity to persist
    ///
    /// # Returns
    /// The persisted user entity
    ///
    /// # Errors
    /// * `EmailTaken` - Email is already registered
    /// * `Store` - Store operation failed
    async fn insert(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve a user by email address.
    ///
    /// # Arguments
    /// * `email` - Email address string (case-sensitive key)
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
}

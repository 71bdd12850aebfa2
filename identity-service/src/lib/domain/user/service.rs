use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenService;

use crate::domain::user::models::Authenticated;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenIdentity;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserStore;

/// Domain service implementation for authentication operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// The hasher and token service arrive fully configured; the signing key
/// and KDF parameters are fixed for the lifetime of the service.
pub struct AuthService<S>
where
    S: UserStore,
{
    store: Arc<S>,
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

impl<S> AuthService<S>
where
    S: UserStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - User persistence implementation
    /// * `password_hasher` - Configured credential hasher
    /// * `token_service` - Configured token signer/verifier
    ///
    /// # Returns
    /// Configured authentication service instance
    pub fn new(store: Arc<S>, password_hasher: PasswordHasher, token_service: TokenService) -> Self {
        Self {
            store,
            password_hasher,
            token_service,
        }
    }

    fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        self.token_service
            .issue(&user.id.to_string(), user.email.as_str())
            .map_err(|e| AuthError::TokenIssue(e.to_string()))
    }
}

#[async_trait]
impl<S> AuthServicePort for AuthService<S>
where
    S: UserStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<Authenticated, AuthError> {
        if self
            .store
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            first_name: command.first_name,
            last_name: command.last_name,
        };

        // The store enforces email uniqueness at insert time; a racing
        // registration surfaces here as the same conflict as the pre-check.
        let user = self.store.insert(user).await?;

        let token = self.issue_token(&user)?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");

        Ok(Authenticated { token, user })
    }

    async fn login(&self, command: LoginCommand) -> Result<Authenticated, AuthError> {
        let user = self
            .store
            .find_by_email(command.email.as_str())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self
            .password_hasher
            .verify(&command.password, &user.password_hash)
        {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;

        tracing::info!(user_id = %user.id, "User authenticated");

        Ok(Authenticated { token, user })
    }

    fn validate_token(&self, header_value: &str) -> Result<TokenIdentity, AuthError> {
        let token = header_value.strip_prefix("Bearer ").unwrap_or(header_value);

        if token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }

        let claims = self
            .token_service
            .validate(token)
            .map_err(|_| AuthError::InvalidToken)?;

        let user_id = UserId::from_string(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

        Ok(TokenIdentity {
            user_id,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::EmailAddress;

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserStore {}

        #[async_trait]
        impl UserStore for TestUserStore {
            async fn insert(&self, user: User) -> Result<User, AuthError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
        }
    }

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn service(store: MockTestUserStore) -> AuthService<MockTestUserStore> {
        AuthService::new(
            Arc::new(store),
            PasswordHasher::default(),
            TokenService::new(SECRET, "identity-service", "identity-clients", 24).unwrap(),
        )
    }

    fn stored_user(email: &str, password: &str) -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: PasswordHasher::default().hash(password).unwrap(),
            first_name: "Ann".to_string(),
            last_name: "Bee".to_string(),
        }
    }

    fn register_command(email: &str) -> RegisterCommand {
        RegisterCommand::new(
            EmailAddress::new(email.to_string()).unwrap(),
            "Secret123!".to_string(),
            "Ann".to_string(),
            "Bee".to_string(),
        )
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut store = MockTestUserStore::new();

        store
            .expect_find_by_email()
            .withf(|email| email == "ann@example.com")
            .times(1)
            .returning(|_| Ok(None));

        store
            .expect_insert()
            .withf(|user| {
                user.email.as_str() == "ann@example.com"
                    && user.first_name == "Ann"
                    && user.last_name == "Bee"
                    && user.password_hash.contains('.')
                    && user.password_hash != "Secret123!"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = service(store);

        let result = service.register(register_command("ann@example.com")).await;
        assert!(result.is_ok());

        let authenticated = result.unwrap();
        assert_eq!(authenticated.user.email.as_str(), "ann@example.com");
        assert_eq!(authenticated.token.split('.').count(), 3);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut store = MockTestUserStore::new();

        store
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user("ann@example.com", "Secret123!"))));

        store.expect_insert().times(0);

        let service = service(store);

        let result = service.register(register_command("ann@example.com")).await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_register_insert_conflict() {
        // Pre-check passes but a racing registration wins the insert.
        let mut store = MockTestUserStore::new();

        store
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        store
            .expect_insert()
            .times(1)
            .returning(|_| Err(AuthError::EmailTaken));

        let service = service(store);

        let result = service.register(register_command("ann@example.com")).await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut store = MockTestUserStore::new();

        let user = stored_user("ann@example.com", "Secret123!");
        let user_id = user.id;
        store
            .expect_find_by_email()
            .withf(|email| email == "ann@example.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(store);

        let command = LoginCommand::new(
            EmailAddress::new("ann@example.com".to_string()).unwrap(),
            "Secret123!".to_string(),
        );

        let result = service.login(command).await;
        assert!(result.is_ok());

        let authenticated = result.unwrap();
        assert_eq!(authenticated.user.id, user_id);
        assert!(!authenticated.token.is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut store = MockTestUserStore::new();

        let user = stored_user("ann@example.com", "Correct_Password!");
        store
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(store);

        let command = LoginCommand::new(
            EmailAddress::new("ann@example.com".to_string()).unwrap(),
            "Wrong_Password!".to_string(),
        );

        let result = service.login(command).await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut store = MockTestUserStore::new();

        store
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(store);

        let command = LoginCommand::new(
            EmailAddress::new("nobody@example.com".to_string()).unwrap(),
            "Secret123!".to_string(),
        );

        let result = service.login(command).await;
        assert!(result.is_err());

        // Same error and message as a wrong password, so account existence
        // cannot be probed through this endpoint.
        let err = result.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn test_validate_token_round_trip() {
        let service = service(MockTestUserStore::new());

        let user_id = UserId::new();
        let token = TokenService::new(SECRET, "identity-service", "identity-clients", 24)
            .unwrap()
            .issue(&user_id.to_string(), "ann@example.com")
            .unwrap();

        let identity = service
            .validate_token(&format!("Bearer {}", token))
            .unwrap();
        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.email, "ann@example.com");
    }

    #[test]
    fn test_validate_token_accepts_unprefixed_value() {
        let service = service(MockTestUserStore::new());

        let user_id = UserId::new();
        let token = TokenService::new(SECRET, "identity-service", "identity-clients", 24)
            .unwrap()
            .issue(&user_id.to_string(), "ann@example.com")
            .unwrap();

        let identity = service.validate_token(&token).unwrap();
        assert_eq!(identity.user_id, user_id);
    }

    #[test]
    fn test_validate_token_missing() {
        let service = service(MockTestUserStore::new());

        for header_value in ["", "Bearer ", "Bearer   "] {
            let result = service.validate_token(header_value);
            assert!(matches!(result.unwrap_err(), AuthError::MissingToken));
        }
    }

    #[test]
    fn test_validate_token_invalid() {
        let service = service(MockTestUserStore::new());

        let result = service.validate_token("Bearer not-a-token");
        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken));
    }

    #[test]
    fn test_validate_token_wrong_key() {
        let service = service(MockTestUserStore::new());

        let foreign = TokenService::new(
            b"another_secret_key_of_32_bytes_ok!",
            "identity-service",
            "identity-clients",
            24,
        )
        .unwrap()
        .issue(&UserId::new().to_string(), "ann@example.com")
        .unwrap();

        let result = service.validate_token(&format!("Bearer {}", foreign));
        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken));
    }

    #[test]
    fn test_validate_token_rejects_non_uuid_subject() {
        let service = service(MockTestUserStore::new());

        let token = TokenService::new(SECRET, "identity-service", "identity-clients", 24)
            .unwrap()
            .issue("not-a-uuid", "ann@example.com")
            .unwrap();

        let result = service.validate_token(&format!("Bearer {}", token));
        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken));
    }
}

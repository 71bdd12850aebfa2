use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::ports::UserStore;
use crate::user::errors::AuthError;

/// In-memory user store keyed by email.
///
/// Reference adapter for the `UserStore` port. The map sits behind a
/// single `RwLock`; `insert` checks and writes under one write guard, so
/// concurrent inserts with the same email resolve to exactly one success
/// and one conflict.
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.write().await;

        if users.contains_key(user.email.as_str()) {
            return Err(AuthError::EmailTaken);
        }

        users.insert(user.email.as_str().to_string(), user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;

        Ok(users.get(email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserId;

    fn user(email: &str) -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "c2FsdA.a2V5".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Bee".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryUserStore::new();

        let inserted = store.insert(user("ann@example.com")).await.unwrap();
        let found = store.find_by_email("ann@example.com").await.unwrap();

        assert_eq!(found.unwrap().id, inserted.id);
    }

    #[tokio::test]
    async fn test_find_unknown_email() {
        let store = InMemoryUserStore::new();

        let found = store.find_by_email("nobody@example.com").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_email() {
        let store = InMemoryUserStore::new();

        store.insert(user("ann@example.com")).await.unwrap();
        let result = store.insert(user("ann@example.com")).await;

        assert!(matches!(result.unwrap_err(), AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_emails_are_case_sensitive_keys() {
        let store = InMemoryUserStore::new();

        store.insert(user("ann@example.com")).await.unwrap();

        assert!(store.insert(user("Ann@example.com")).await.is_ok());
        assert!(store
            .find_by_email("ann@example.com")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_by_email("ANN@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_inserts_one_conflict() {
        let store = Arc::new(InMemoryUserStore::new());

        let first = Arc::clone(&store);
        let second = Arc::clone(&store);
        let (a, b) = tokio::join!(
            tokio::spawn(async move { first.insert(user("ann@example.com")).await }),
            tokio::spawn(async move { second.insert(user("ann@example.com")).await }),
        );

        let results = [a.unwrap(), b.unwrap()];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    }
}

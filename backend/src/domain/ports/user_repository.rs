//! Driven port for user persistence.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{User, UserId};

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// The username is already taken.
    #[error("username {username} is already registered")]
    DuplicateUsername { username: String },

    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

impl UserRepositoryError {
    /// Create a duplicate-username error.
    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Self::DuplicateUsername {
            username: username.into(),
        }
    }

    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for writing and reading user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user; usernames are unique.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Find a user by id.
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str)
        -> Result<Option<User>, UserRepositoryError>;

    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Replace a user's stored credential digest.
    async fn update_password(
        &self,
        user_id: UserId,
        password_digest: &str,
    ) -> Result<(), UserRepositoryError>;
}

/// Mutex-guarded user store for tests and database-less deployments.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, User>> {
        match self.users.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.lock();
        if users.values().any(|existing| existing.username == user.username) {
            return Err(UserRepositoryError::duplicate_username(&user.username));
        }
        users.insert(*user.id.as_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.lock().get(user_id.as_uuid()).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .lock()
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .lock()
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn update_password(
        &self,
        user_id: UserId,
        password_digest: &str,
    ) -> Result<(), UserRepositoryError> {
        let mut users = self.lock();
        match users.get_mut(user_id.as_uuid()) {
            Some(user) => {
                user.password_digest = password_digest.to_owned();
                Ok(())
            }
            None => Err(UserRepositoryError::query(format!(
                "user {user_id} not found"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn build_user(username: &str) -> User {
        User::new(
            UserId::random(),
            username,
            format!("{username}@example.com"),
            "+4470000001",
            "salt$digest",
        )
        .expect("valid user")
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&build_user("ada")).await.expect("first insert");

        let err = repo
            .insert(&build_user("ada"))
            .await
            .expect_err("duplicate username");
        assert!(matches!(err, UserRepositoryError::DuplicateUsername { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn password_update_replaces_digest() {
        let repo = InMemoryUserRepository::new();
        let user = build_user("ada");
        repo.insert(&user).await.expect("insert");

        repo.update_password(user.id, "salt$other")
            .await
            .expect("update password");
        let reloaded = repo
            .find_by_id(user.id)
            .await
            .expect("lookup")
            .expect("user present");
        assert_eq!(reloaded.password_digest, "salt$other");
    }
}

//! Driving port for registration, authentication, and password management.
//!
//! Session establishment itself stays in the inbound adapter; this port only
//! answers "who is this" questions against the user store.

use async_trait::async_trait;

use crate::domain::{Error, UserId};

/// Request to register a new user.
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone_number: String,
}

/// Credentials presented at login.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Keep passwords out of debug output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Domain use-case port for identity operations.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Create a user, hash their password, and trigger a best-effort phone
    /// verification message.
    async fn register(&self, request: RegisterUserRequest) -> Result<UserId, Error>;

    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error>;

    /// Replace the user's password after verifying the old one.
    async fn change_password(
        &self,
        user: UserId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), Error>;

    /// Start a password reset. Always succeeds from the caller's point of
    /// view so responses cannot be used to enumerate registered emails.
    async fn request_password_reset(&self, email: &str) -> Result<(), Error>;
}

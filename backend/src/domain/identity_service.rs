//! Identity domain service: registration, login checks, and password flows.

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{
    Credentials, IdentityService, NotificationGateway, RegisterUserRequest, UserRepository,
    UserRepositoryError,
};
use crate::domain::{hash_password, verify_password, Error, User, UserId, UserValidationError};

const MIN_PASSWORD_LEN: usize = 8;

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::DuplicateUsername { username } => {
            Error::conflict(format!("username {username} is already registered"))
        }
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_validation_error(error: UserValidationError) -> Error {
    let field = match error {
        UserValidationError::EmptyUsername | UserValidationError::UsernameTooLong { .. } => {
            "username"
        }
        UserValidationError::InvalidEmail => "email",
        UserValidationError::PhoneNumberTooLong { .. } => "phone_number",
    };
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

fn bad_credentials() -> Error {
    Error::unauthorized("invalid username or password")
}

/// Generate a 6-digit verification code.
fn verification_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

/// Identity service implementing the [`IdentityService`] driving port.
///
/// Verification delivery is fire-and-forget: the send runs on a detached
/// task and a failure is logged, never surfaced to the registering user.
#[derive(Clone)]
pub struct IdentityServiceImpl<R> {
    users: Arc<R>,
    notifier: Arc<dyn NotificationGateway>,
}

impl<R> IdentityServiceImpl<R> {
    /// Create an identity service over the user store and notifier.
    pub fn new(users: Arc<R>, notifier: Arc<dyn NotificationGateway>) -> Self {
        Self { users, notifier }
    }
}

#[async_trait]
impl<R> IdentityService for IdentityServiceImpl<R>
where
    R: UserRepository,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<UserId, Error> {
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::invalid_request(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            ))
            .with_details(json!({ "field": "password" })));
        }

        let user = User::new(
            UserId::random(),
            request.username,
            request.email,
            &request.phone_number,
            hash_password(&request.password),
        )
        .map_err(map_validation_error)?;

        self.users
            .insert(&user)
            .await
            .map_err(map_repository_error)?;

        let notifier = Arc::clone(&self.notifier);
        let phone = user.phone_number.clone();
        let code = verification_code();
        tokio::spawn(async move {
            if let Err(err) = notifier.send_verification(&phone, &code).await {
                warn!(error = %err, "verification code delivery failed");
            }
        });

        Ok(user.id)
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let user = self
            .users
            .find_by_username(&credentials.username)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(bad_credentials)?;
        if !verify_password(&credentials.password, &user.password_digest) {
            return Err(bad_credentials());
        }
        Ok(user.id)
    }

    async fn change_password(
        &self,
        user_id: UserId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), Error> {
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::invalid_request(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            ))
            .with_details(json!({ "field": "new_password" })));
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized("session refers to an unknown user"))?;
        if !verify_password(old_password, &user.password_digest) {
            return Err(Error::invalid_request("old password is incorrect")
                .with_details(json!({ "field": "old_password" })));
        }

        self.users
            .update_password(user_id, &hash_password(new_password))
            .await
            .map_err(map_repository_error)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), Error> {
        // Uniform response regardless of whether the email exists, so the
        // endpoint cannot be used to enumerate accounts.
        match self.users.find_by_email(email).await {
            Ok(Some(user)) => {
                debug!(user_id = %user.id, "password reset requested for known email");
            }
            Ok(None) => {
                debug!("password reset requested for unknown email");
            }
            Err(err) => {
                warn!(error = %err, "password reset lookup failed");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod tests;

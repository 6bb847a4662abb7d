//! User identity entity.
//!
//! The user record folds in the phone/verification profile the booking flows
//! need; credential material is stored as a salted digest, never plaintext.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Construct an id from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors returned by [`User::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    #[error("email must contain '@'")]
    InvalidEmail,
    #[error("phone number must be at most {max} characters")]
    PhoneNumberTooLong { max: usize },
}

const USERNAME_MAX: usize = 150;
const PHONE_MAX: usize = 15;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub is_verified: bool,
    /// Salted credential digest in `salt$digest` form.
    pub password_digest: String,
}

impl User {
    /// Validate field shape and construct a user.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        password_digest: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if username.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        let email = email.into();
        if !email.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }
        let phone_number = phone_number.into();
        if phone_number.chars().count() > PHONE_MAX {
            return Err(UserValidationError::PhoneNumberTooLong { max: PHONE_MAX });
        }
        Ok(Self {
            id,
            username,
            email,
            phone_number,
            is_verified: false,
            password_digest: password_digest.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn build(username: &str, email: &str, phone: &str) -> Result<User, UserValidationError> {
        User::new(UserId::random(), username, email, phone, "salt$digest")
    }

    #[rstest]
    fn accepts_valid_fields() {
        let user = build("ada", "ada@example.com", "+4470000001").expect("valid user");
        assert!(!user.is_verified);
    }

    #[rstest]
    #[case("", "ada@example.com", "1", UserValidationError::EmptyUsername)]
    #[case("ada", "nope", "1", UserValidationError::InvalidEmail)]
    #[case(
        "ada",
        "ada@example.com",
        "0123456789012345",
        UserValidationError::PhoneNumberTooLong { max: 15 }
    )]
    fn rejects_invalid_fields(
        #[case] username: &str,
        #[case] email: &str,
        #[case] phone: &str,
        #[case] expected: UserValidationError,
    ) {
        assert_eq!(build(username, email, phone).expect_err("invalid"), expected);
    }
}

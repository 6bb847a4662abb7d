//! Driven port for outbound notifications (SMS verification codes).
//!
//! Delivery is best-effort fire-and-forget: callers log failures and never
//! let them block or fail the triggering operation.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

/// Errors raised by notification gateway adapters. These are logged by the
/// caller, never propagated to clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("notification delivery failed: {message}")]
pub struct NotificationError {
    message: String,
}

impl NotificationError {
    /// Create a delivery error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Port for delivering a phone verification code.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Send a verification code to the given phone number.
    async fn send_verification(&self, phone: &str, code: &str) -> Result<(), NotificationError>;
}

/// Gateway that drops every message; used when no provider is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNotificationGateway;

#[async_trait]
impl NotificationGateway for NoOpNotificationGateway {
    async fn send_verification(&self, _phone: &str, _code: &str) -> Result<(), NotificationError> {
        Ok(())
    }
}

/// Gateway that records every send for assertions in tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotificationGateway {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingNotificationGateway {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the `(phone, code)` pairs sent so far.
    pub fn sent(&self) -> Vec<(String, String)> {
        match self.sent.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl NotificationGateway for RecordingNotificationGateway {
    async fn send_verification(&self, phone: &str, code: &str) -> Result<(), NotificationError> {
        let mut sent = match self.sent.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        sent.push((phone.to_owned(), code.to_owned()));
        Ok(())
    }
}

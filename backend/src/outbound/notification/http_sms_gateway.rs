//! SMS delivery over a provider's HTTP API.
//!
//! Posts a JSON payload to the configured endpoint. Callers treat delivery as
//! best-effort; failures are returned for logging, never propagated to
//! clients.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::ports::{NotificationError, NotificationGateway};

#[derive(Debug, Serialize)]
struct SmsPayload<'a> {
    to: &'a str,
    message: String,
}

fn verification_message(code: &str) -> String {
    format!("Your parking verification code is {code}")
}

/// Gateway that delivers verification codes through an HTTP SMS provider.
#[derive(Debug, Clone)]
pub struct HttpSmsGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSmsGateway {
    /// Create a gateway posting to the given provider endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl NotificationGateway for HttpSmsGateway {
    async fn send_verification(&self, phone: &str, code: &str) -> Result<(), NotificationError> {
        let payload = SmsPayload {
            to: phone,
            message: verification_message(code),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| NotificationError::new(err.to_string()))?;

        response
            .error_for_status()
            .map(|_| ())
            .map_err(|err| NotificationError::new(err.to_string()))
    }
}

// --- File: crates/pushlink_flow/src/backend.rs ---
//! Client for the registration backend.
//!
//! The backend is an external collaborator exposing a single endpoint:
//! `POST {base_url}/test-store/fcm-token` with a `{user_id, token}` JSON
//! body and a `{success, message}` JSON response. No authentication, no
//! retry, no idempotency key.

use crate::error::FlowError;
use pushlink_common::http::client::create_client;
use pushlink_common::{RegistrationOutcome, RegistrationRequest, RegistrationResponse};
use pushlink_config::BackendConfig;
use reqwest::Client;
use tracing::{info, warn};

/// Client for posting (user, token) registrations to the backend.
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a new backend client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: create_client(config.request_timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submits one registration request.
    ///
    /// The token is sent exactly as given; an empty token is transmitted
    /// as-is, with a warning, because the backend owns the interpretation.
    /// A backend-reported failure (`success: false`) is not an error at
    /// this level: it is logged as a warning and returned as a
    /// non-accepted outcome with nothing to surface to the user.
    pub async fn register_token(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<RegistrationOutcome, FlowError> {
        if token.is_empty() {
            warn!(user_id, "submitting registration with an empty device token");
        }

        let request = RegistrationRequest {
            user_id: user_id.to_string(),
            token: token.to_string(),
        };
        let url = format!("{}/test-store/fcm-token", self.base_url);

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: RegistrationResponse = serde_json::from_str(&body).map_err(|err| {
            FlowError::ResponseParseError(format!("status {status}, body {body:?}: {err}"))
        })?;

        if parsed.success {
            info!(user_id, message = %parsed.message, "registration accepted by backend");
        } else {
            warn!(user_id, message = %parsed.message, "backend rejected registration");
        }

        Ok(RegistrationOutcome::from_response(parsed))
    }
}

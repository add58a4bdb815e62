//! HTTP client for the Firebase device-registration surface.
//!
//! Token acquisition goes through the Firebase Installations API (an
//! installation is created, then its auth handle is exchanged for an FCM
//! registration token); topic subscription goes through the Instance ID
//! API. Base URLs are configurable so tests can point every call at a
//! local mock server.

use crate::auth::get_fcm_auth_token;
use pushlink_common::http::client::HTTP_CLIENT;
use pushlink_config::MessagingConfig;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const DEFAULT_INSTALLATIONS_URL: &str = "https://firebaseinstallations.googleapis.com";
const DEFAULT_REGISTRATIONS_URL: &str = "https://fcmregistrations.googleapis.com";
const DEFAULT_IID_URL: &str = "https://iid.googleapis.com";

/// Errors that can occur when talking to the Firebase messaging APIs
#[derive(Error, Debug)]
pub enum FcmError {
    /// Error during authentication with Firebase
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error during HTTP request to a Firebase API
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// Error returned by a Firebase API
    #[error("Firebase API error: {0}")]
    ApiError(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InstallationRequest<'a> {
    app_id: &'a str,
    sdk_version: &'a str,
    auth_version: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstallationAuthToken {
    token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstallationResponse {
    fid: String,
    auth_token: InstallationAuthToken,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationTokenRequest<'a> {
    fid: &'a str,
}

#[derive(Debug, Deserialize)]
struct RegistrationTokenResponse {
    token: String,
}

/// Client for the Firebase Installations, FCM registrations and Instance
/// ID APIs.
pub struct FcmClient {
    client: Client,
    config: MessagingConfig,
}

impl FcmClient {
    /// Creates a new client with the given messaging configuration.
    pub fn new(config: MessagingConfig) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            config,
        }
    }

    fn project_id(&self) -> Result<&str, FcmError> {
        self.config.project_id.as_deref().ok_or_else(|| {
            FcmError::ConfigError("Missing project_id in MessagingConfig".to_string())
        })
    }

    fn api_key(&self) -> Result<&str, FcmError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| FcmError::ConfigError("Missing api_key in MessagingConfig".to_string()))
    }

    /// Fetches a device identity token for this installation.
    ///
    /// Creates an installation, then exchanges the installation auth
    /// handle for an FCM registration token.
    pub async fn fetch_device_token(&self) -> Result<String, FcmError> {
        let project_id = self.project_id()?;
        let api_key = self.api_key()?;
        let app_id = self.config.app_id.as_deref().ok_or_else(|| {
            FcmError::ConfigError("Missing app_id in MessagingConfig".to_string())
        })?;

        let installations_base = self
            .config
            .installations_url
            .as_deref()
            .unwrap_or(DEFAULT_INSTALLATIONS_URL);
        let url = format!("{installations_base}/v1/projects/{project_id}/installations");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&InstallationRequest {
                app_id,
                sdk_version: concat!("r:", env!("CARGO_PKG_VERSION")),
                auth_version: "FIS_v2",
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(FcmError::ApiError(error_text));
        }
        let installation: InstallationResponse = response.json().await?;
        debug!(fid = %installation.fid, "installation created");

        let registrations_base = self
            .config
            .registrations_url
            .as_deref()
            .unwrap_or(DEFAULT_REGISTRATIONS_URL);
        let url = format!("{registrations_base}/v1/projects/{project_id}/registrations");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header(
                "x-goog-firebase-installations-auth",
                &installation.auth_token.token,
            )
            .json(&RegistrationTokenRequest {
                fid: &installation.fid,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(FcmError::ApiError(error_text));
        }
        let registration: RegistrationTokenResponse = response.json().await?;
        Ok(registration.token)
    }

    /// Subscribes a device token to a topic via the Instance ID API.
    ///
    /// Authenticates with an OAuth2 bearer when a service account key is
    /// configured, otherwise with the legacy `key=` server-key scheme.
    pub async fn subscribe_to_topic(&self, token: &str, topic: &str) -> Result<(), FcmError> {
        let iid_base = self.config.iid_url.as_deref().unwrap_or(DEFAULT_IID_URL);
        let url = format!("{iid_base}/iid/v1/{token}/rel/topics/{topic}");

        let mut request = self.client.post(&url);
        if self.config.key_path.is_some() {
            let bearer = get_fcm_auth_token(&self.config)
                .await
                .map_err(|e| FcmError::AuthError(e.to_string()))?;
            request = request
                .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
                .header("access_token_auth", "true");
        } else {
            let api_key = self.api_key()?;
            request = request.header(header::AUTHORIZATION, format!("key={}", api_key));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(FcmError::ApiError(error_text));
        }

        Ok(())
    }
}

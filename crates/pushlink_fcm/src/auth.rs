//! Authentication for the Instance ID API.
//!
//! Topic subscriptions authenticated with a service account use an OAuth2
//! bearer token generated from a key file; installations with only a web
//! API key fall back to the legacy `key=` authorization scheme handled in
//! the client.

use pushlink_common::{config_error, internal_error, Context, PushlinkError};
use pushlink_config::MessagingConfig;
use std::path::Path;
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

/// Obtains an OAuth2 access token for the messaging APIs.
///
/// Reads the service account key file named in the messaging config and
/// requests a token with the Firebase Cloud Messaging scope.
///
/// # Errors
///
/// Fails when `key_path` is missing from the config, the key file cannot
/// be read, or the OAuth2 exchange does not yield a token.
pub async fn get_fcm_auth_token(config: &MessagingConfig) -> Result<String, PushlinkError> {
    let key_path = config
        .key_path
        .as_deref()
        .ok_or_else(|| config_error("Missing key_path in MessagingConfig"))?;

    let sa_key = read_service_account_key(Path::new(key_path))
        .await
        .context("reading service account key")?;

    let auth = ServiceAccountAuthenticator::builder(sa_key)
        .build()
        .await
        .context("building service account authenticator")?;

    // Topic management uses the same scope as message sending
    let auth_token = auth
        .token(&["https://www.googleapis.com/auth/firebase.messaging"])
        .await
        .context("requesting OAuth2 token")?;
    let token = match auth_token.token() {
        Some(token) => token,
        None => {
            return Err(internal_error("No token available"));
        }
    };

    Ok(token.to_string())
}

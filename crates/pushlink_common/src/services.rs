// --- File: crates/pushlink_common/src/services.rs ---
//! Service abstractions for the push-messaging provider.
//!
//! This module provides trait definitions for the external services the
//! registration flow depends on. The flow controller depends on these traits
//! rather than on a concrete vendor SDK, which allows substituting a fake
//! provider in tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for
/// Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Notification permission reported by the provider / platform.
///
/// Mirrors the authorization statuses of the usual mobile push SDKs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    NotDetermined,
    Denied,
    Authorized,
    Provisional,
}

impl PermissionStatus {
    /// A session may register for notifications when the status is
    /// authorized or provisional; every other status counts as a denial.
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Authorized | PermissionStatus::Provisional)
    }
}

impl FromStr for PermissionStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "not_determined" => Ok(PermissionStatus::NotDetermined),
            "denied" => Ok(PermissionStatus::Denied),
            "authorized" => Ok(PermissionStatus::Authorized),
            "provisional" => Ok(PermissionStatus::Provisional),
            other => Err(format!("unknown permission status: {other}")),
        }
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PermissionStatus::NotDetermined => "not_determined",
            PermissionStatus::Denied => "denied",
            PermissionStatus::Authorized => "authorized",
            PermissionStatus::Provisional => "provisional",
        };
        write!(f, "{name}")
    }
}

/// A message delivered by the push-messaging provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteMessage {
    /// Provider-assigned message ID, when one was delivered.
    pub message_id: Option<String>,
    /// Notification title, if the message carries a display notification.
    pub title: Option<String>,
    /// Notification body, if the message carries a display notification.
    pub body: Option<String>,
    /// Custom key-value data sent with the message.
    #[serde(default)]
    pub data: HashMap<String, String>,
    /// When the provider handed the message to this device.
    pub received_at: Option<DateTime<Utc>>,
}

/// A sink for notification lifecycle events.
///
/// One method per event kind. Sink invocations are fire-and-forget side
/// effects driven by the provider's runtime: they surface a user-visible
/// notice plus a diagnostic log entry and never feed back into the
/// registration flow's state.
pub trait NotificationSink: Send + Sync {
    /// A notification caused the app to open from the background.
    fn opened_from_background(&self, message: &RemoteMessage);

    /// A message was handled while the app was in the background.
    fn background_message(&self, message: &RemoteMessage);

    /// A message arrived while the app was in the foreground.
    fn foreground_message(&self, message: &RemoteMessage);

    /// A notification caused the app to open from a quit state
    /// (the provider's "initial notification").
    fn opened_from_quit(&self, message: &RemoteMessage);
}

/// A trait for push-messaging provider operations.
///
/// This is the seam between the registration flow and the vendor SDK:
/// permission negotiation, device token acquisition, topic subscription and
/// handler registration. Delivery guarantees behind these operations are the
/// provider's concern, not the flow's.
pub trait MessagingProvider: Send + Sync {
    /// Error type returned by provider operations.
    type Error: StdError + Send + Sync + 'static;

    /// Ask the platform/provider for notification permission.
    fn request_permission(&self) -> BoxFuture<'_, PermissionStatus, Self::Error>;

    /// Fetch the current device identity token for this installation.
    fn get_token(&self) -> BoxFuture<'_, String, Self::Error>;

    /// Subscribe this device to a named broadcast topic.
    fn subscribe_to_topic(&self, topic: &str) -> BoxFuture<'_, (), Self::Error>;

    /// Register the notification sink with the provider's dispatch
    /// mechanism. The provider invokes the sink at arbitrary future times.
    fn register_handlers(&self, sink: Arc<dyn NotificationSink>) -> BoxFuture<'_, (), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granted_statuses_are_authorized_and_provisional() {
        assert!(PermissionStatus::Authorized.is_granted());
        assert!(PermissionStatus::Provisional.is_granted());
        assert!(!PermissionStatus::Denied.is_granted());
        assert!(!PermissionStatus::NotDetermined.is_granted());
    }

    #[test]
    fn permission_status_round_trips_through_str() {
        for status in [
            PermissionStatus::NotDetermined,
            PermissionStatus::Denied,
            PermissionStatus::Authorized,
            PermissionStatus::Provisional,
        ] {
            assert_eq!(status.to_string().parse::<PermissionStatus>(), Ok(status));
        }
        assert!("granted".parse::<PermissionStatus>().is_err());
    }
}

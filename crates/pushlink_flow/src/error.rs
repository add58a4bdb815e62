// --- File: crates/pushlink_flow/src/error.rs ---

use pushlink_common::BoxedError;
use thiserror::Error;

/// Errors produced by the registration flow.
///
/// Every failure is logged at the step where it occurs; the error is also
/// returned to the caller so an embedding application can decide what to
/// surface. Permission denial is deliberately not an error: the session
/// simply proceeds without notifications.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The provider failed while answering the permission request.
    #[error("Permission request failed: {0}")]
    PermissionRequestFailed(#[source] BoxedError),

    /// The device identity token could not be fetched.
    #[error("Device token unavailable: {0}")]
    TokenUnavailable(#[source] BoxedError),

    /// Handler registration with the provider's dispatch mechanism failed.
    #[error("Handler registration failed: {0}")]
    HandlerRegistrationFailed(#[source] BoxedError),

    /// Topic subscription was rejected by the provider.
    #[error("Topic subscription failed for '{topic}': {source}")]
    SubscriptionFailed {
        topic: String,
        #[source]
        source: BoxedError,
    },

    /// The registration POST failed in transport.
    #[error("Backend registration request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The backend answered with a payload that is not the expected
    /// {success, message} shape.
    #[error("Failed to parse backend response: {0}")]
    ResponseParseError(String),

    /// A step did not resolve within its configured timeout.
    #[error("Step '{step}' timed out after {timeout_secs}s")]
    StepTimeout { step: &'static str, timeout_secs: u64 },

    /// Initialization was cancelled while a step was in flight.
    #[error("Initialization cancelled during step '{step}'")]
    Cancelled { step: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_display_names_the_step() {
        let err = FlowError::StepTimeout {
            step: "get_token",
            timeout_secs: 30,
        };
        assert_eq!(err.to_string(), "Step 'get_token' timed out after 30s");
    }

    #[test]
    fn subscription_failure_names_the_topic() {
        let err = FlowError::SubscriptionFailed {
            topic: "MyNews".to_string(),
            source: BoxedError("quota exceeded".into()),
        };
        assert!(err.to_string().contains("MyNews"));
    }
}

// --- File: crates/pushlink_common/src/models.rs ---

// Data structures shared across the pushlink crates: the backend wire
// contract and the outcome surfaced to the embedding application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The (user, token) pair posted to the registration backend.
///
/// The token is sent exactly as held in session state; an empty token is
/// transmitted as an empty string rather than rejected locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// The application-level user to associate the push identity with
    pub user_id: String,

    /// The device identity token issued by the push-messaging provider
    pub token: String,
}

/// The backend's answer to a registration request.
///
/// The backend's interpretation of success is opaque to the client: a
/// boolean flag plus a human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    /// Whether the backend accepted the registration
    pub success: bool,

    /// Human-readable message accompanying the result
    pub message: String,
}

/// Result of a registration submission, as seen by the embedding app.
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    /// Whether the backend reported success
    pub accepted: bool,

    /// Message to surface to the user. Only populated on the accepted
    /// path; a backend-reported failure is logged, not surfaced.
    pub user_message: Option<String>,

    /// When the registration request was submitted
    pub submitted_at: DateTime<Utc>,
}

impl RegistrationOutcome {
    /// Build an outcome from a backend response, stamping the submission
    /// time.
    pub fn from_response(response: RegistrationResponse) -> Self {
        Self {
            accepted: response.success,
            user_message: response.success.then_some(response.message),
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_response_surfaces_the_message() {
        let outcome = RegistrationOutcome::from_response(RegistrationResponse {
            success: true,
            message: "OK".to_string(),
        });
        assert!(outcome.accepted);
        assert_eq!(outcome.user_message.as_deref(), Some("OK"));
    }

    #[test]
    fn rejected_response_surfaces_nothing() {
        let outcome = RegistrationOutcome::from_response(RegistrationResponse {
            success: false,
            message: "bad token".to_string(),
        });
        assert!(!outcome.accepted);
        assert!(outcome.user_message.is_none());
    }

    #[test]
    fn request_serializes_with_the_backend_field_names() {
        let request = RegistrationRequest {
            user_id: "530709cf-d57d-47ed-ba9a-79212bc9df87".to_string(),
            token: String::new(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user_id": "530709cf-d57d-47ed-ba9a-79212bc9df87",
                "token": ""
            })
        );
    }
}

// --- File: crates/pushlink_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Backend Config ---
// The registration backend is an external collaborator exposing one endpoint.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    /// Base URL of the registration backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout for the registration POST, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://vomoz.up.railway.app/api/v1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

// --- Messaging Config ---
// Holds non-secret provider config. The API key can also be loaded via
// APP_MESSAGING__API_KEY.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MessagingConfig {
    /// Broadcast topic every device subscribes to after initialization.
    #[serde(default = "default_topic")]
    pub topic: String,
    /// Firebase project ID.
    pub project_id: Option<String>,
    /// Web API key sent to the Installations API.
    pub api_key: Option<String>,
    /// Path to a service account key file for the Instance ID API.
    pub key_path: Option<String>,
    /// Application identifier reported to the Installations API.
    pub app_id: Option<String>,
    /// Notification permission granted by the embedding platform:
    /// "authorized", "provisional" or "denied". Headless embeddings have
    /// no permission dialog of their own.
    pub permission: Option<String>,
    /// Timeout applied to each asynchronous initialization step, in seconds.
    #[serde(default = "default_step_timeout_secs")]
    pub step_timeout_secs: u64,
    /// Override for the Firebase Installations endpoint (used by tests).
    pub installations_url: Option<String>,
    /// Override for the FCM registrations endpoint (used by tests).
    pub registrations_url: Option<String>,
    /// Override for the Instance ID endpoint (used by tests).
    pub iid_url: Option<String>,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            topic: default_topic(),
            project_id: None,
            api_key: None,
            key_path: None,
            app_id: None,
            permission: None,
            step_timeout_secs: default_step_timeout_secs(),
            installations_url: None,
            registrations_url: None,
            iid_url: None,
        }
    }
}

fn default_topic() -> String {
    "MyNews".to_string()
}

fn default_step_timeout_secs() -> u64 {
    30
}

// --- User Roster ---
/// A registrable application user. The roster is compiled-in demo data,
/// overridable from config files.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub user_id: Uuid,
}

/// Compiled-in demo roster used when no `users` section is configured.
pub fn default_users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            name: "Jackson Kasi".to_string(),
            user_id: "530709cf-d57d-47ed-ba9a-79212bc9df87"
                .parse()
                .expect("static user id is a valid UUID"),
        },
        UserRecord {
            name: "EmonDas".to_string(),
            user_id: "9e74e2a1-b4f4-444c-9646-cd8c020eb8d4"
                .parse()
                .expect("static user id is a valid UUID"),
        },
    ]
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub messaging: MessagingConfig,
    /// Static set of selectable users.
    #[serde(default = "default_users")]
    pub users: Vec<UserRecord>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            messaging: MessagingConfig::default(),
            users: default_users(),
        }
    }
}

impl AppConfig {
    /// Looks up a user in the static roster by id.
    pub fn find_user(&self, user_id: &Uuid) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.user_id == *user_id)
    }
}

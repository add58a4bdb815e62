// --- File: crates/pushlink_flow/src/session.rs ---
//! Per-session registration state.
//!
//! The device token and the selected user live in an explicit session
//! object owned by the controller, together with the lifecycle state
//! machine, rather than in module-level mutable state.

use pushlink_config::UserRecord;
use std::fmt;

/// Lifecycle state of the registration flow, per app session.
///
/// `Uninitialized → PermissionRequested → {PermissionGranted →
/// TokenAcquired → HandlersRegistered → TopicSubscribed} |
/// PermissionDenied`. Denial is terminal; there is no rollback from any
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Uninitialized,
    PermissionRequested,
    PermissionDenied,
    PermissionGranted,
    TokenAcquired,
    HandlersRegistered,
    TopicSubscribed,
}

impl FlowState {
    /// Whether the session can still make progress. Denial is the only
    /// terminal failure state; `TopicSubscribed` is the terminal success
    /// state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::PermissionDenied | FlowState::TopicSubscribed)
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowState::Uninitialized => "uninitialized",
            FlowState::PermissionRequested => "permission_requested",
            FlowState::PermissionDenied => "permission_denied",
            FlowState::PermissionGranted => "permission_granted",
            FlowState::TokenAcquired => "token_acquired",
            FlowState::HandlersRegistered => "handlers_registered",
            FlowState::TopicSubscribed => "topic_subscribed",
        };
        write!(f, "{name}")
    }
}

/// In-memory session state: the device identity token, the selected user
/// and the lifecycle state. Confined to the task driving the controller;
/// nothing here needs locking.
#[derive(Debug, Clone)]
pub struct SessionState {
    token: String,
    selected_user: UserRecord,
    state: FlowState,
}

impl SessionState {
    /// Create a fresh session with the given initial user selection.
    pub fn new(initial_user: UserRecord) -> Self {
        Self {
            token: String::new(),
            selected_user: initial_user,
            state: FlowState::Uninitialized,
        }
    }

    /// The device identity token observed so far. Empty until a token
    /// fetch succeeds; submission with an empty token is not guarded
    /// against.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn set_token(&mut self, token: String) {
        self.token = token;
    }

    pub fn selected_user(&self) -> &UserRecord {
        &self.selected_user
    }

    pub fn select_user(&mut self, user: UserRecord) {
        self.selected_user = user;
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub(crate) fn advance(&mut self, state: FlowState) {
        tracing::debug!(from = %self.state, to = %state, "flow state transition");
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushlink_config::default_users;

    #[test]
    fn fresh_session_is_uninitialized_with_empty_token() {
        let session = SessionState::new(default_users().remove(0));
        assert_eq!(session.state(), FlowState::Uninitialized);
        assert_eq!(session.token(), "");
        assert_eq!(session.selected_user().name, "Jackson Kasi");
    }

    #[test]
    fn terminal_states() {
        assert!(FlowState::PermissionDenied.is_terminal());
        assert!(FlowState::TopicSubscribed.is_terminal());
        assert!(!FlowState::TokenAcquired.is_terminal());
        assert!(!FlowState::Uninitialized.is_terminal());
    }
}

// --- File: crates/pushlink_flow/src/controller.rs ---
//! The registration flow controller.
//!
//! Drives the one-time setup sequence (permission request, device token
//! fetch, handler registration, topic subscription) and exposes a manual
//! trigger to push the current (user, token) pair to the backend. Every
//! asynchronous step is best-effort: a failure is logged and halts the
//! sequence at that step, with no retry and no rollback. Each step carries
//! an explicit timeout and observes a cancellation token.

use crate::backend::BackendClient;
use crate::error::FlowError;
use crate::session::{FlowState, SessionState};
use pushlink_common::{
    BoxFuture, BoxedError, MessagingProvider, NotificationSink, RegistrationOutcome,
};
use pushlink_config::{AppConfig, UserRecord};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use uuid::Uuid;

/// How a single initialization step failed, before being mapped to the
/// step-specific [`FlowError`] variant.
enum StepFailure {
    Cancelled,
    Timeout,
    Provider(BoxedError),
}

/// Races a provider call against its timeout and the cancellation token.
async fn run_step<T>(
    future: BoxFuture<'_, T, BoxedError>,
    timeout_secs: u64,
    cancel: &CancellationToken,
) -> Result<T, StepFailure> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(StepFailure::Cancelled),
        result = tokio::time::timeout(Duration::from_secs(timeout_secs), future) => {
            match result {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(err)) => Err(StepFailure::Provider(err)),
                Err(_) => Err(StepFailure::Timeout),
            }
        }
    }
}

/// Orchestrates the notification-registration lifecycle for one session.
///
/// The controller depends on the [`MessagingProvider`] trait rather than a
/// concrete SDK, so tests substitute a fake. Session state (token, selected
/// user, lifecycle state) is owned by the controller instance; it is meant
/// to be driven from a single task.
pub struct RegistrationFlowController {
    provider: Arc<dyn MessagingProvider<Error = BoxedError>>,
    sink: Arc<dyn NotificationSink>,
    backend: BackendClient,
    config: Arc<AppConfig>,
    session: SessionState,
}

impl RegistrationFlowController {
    /// Creates a controller with the first configured user preselected.
    ///
    /// # Errors
    ///
    /// Returns an error if the user roster is empty or the backend HTTP
    /// client cannot be built.
    pub fn new(
        config: Arc<AppConfig>,
        provider: Arc<dyn MessagingProvider<Error = BoxedError>>,
        sink: Arc<dyn NotificationSink>,
    ) -> Result<Self, FlowError> {
        let initial_user = config
            .users
            .first()
            .cloned()
            .ok_or_else(|| FlowError::ConfigError("user roster is empty".to_string()))?;
        let backend = BackendClient::new(&config.backend)?;

        Ok(Self {
            provider,
            sink,
            backend,
            config,
            session: SessionState::new(initial_user),
        })
    }

    /// Read access to the session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Asks the provider for notification permission.
    ///
    /// Returns true if the status is authorized or provisional, false
    /// otherwise. No retries; a denial is terminal for the session.
    pub async fn request_permission(&self) -> Result<bool, FlowError> {
        let status = run_step(
            self.provider.request_permission(),
            self.config.messaging.step_timeout_secs,
            &CancellationToken::new(),
        )
        .await
        .map_err(|failure| {
            self.step_error("request_permission", failure, FlowError::PermissionRequestFailed)
        })?;

        info!(%status, "authorization status");
        Ok(status.is_granted())
    }

    /// Runs the one-time setup sequence.
    ///
    /// On granted permission, in order: fetch and store the device identity
    /// token, register the four notification handlers with the provider,
    /// subscribe to the configured topic. Returns the state the session
    /// ended in; permission denial yields `Ok(FlowState::PermissionDenied)`
    /// rather than an error because the app proceeds without notifications.
    pub async fn initialize(&mut self, cancel: &CancellationToken) -> Result<FlowState, FlowError> {
        let timeout_secs = self.config.messaging.step_timeout_secs;

        self.session.advance(FlowState::PermissionRequested);
        let status = run_step(self.provider.request_permission(), timeout_secs, cancel)
            .await
            .map_err(|failure| {
                self.step_error("request_permission", failure, FlowError::PermissionRequestFailed)
            })?;
        info!(%status, "authorization status");

        if !status.is_granted() {
            error!("No permission to receive notifications");
            self.session.advance(FlowState::PermissionDenied);
            return Ok(FlowState::PermissionDenied);
        }
        self.session.advance(FlowState::PermissionGranted);

        let token = run_step(self.provider.get_token(), timeout_secs, cancel)
            .await
            .map_err(|failure| self.step_error("get_token", failure, FlowError::TokenUnavailable))?;
        info!(token_len = token.len(), "device token acquired");
        self.session.set_token(token);
        self.session.advance(FlowState::TokenAcquired);

        run_step(
            self.provider.register_handlers(self.sink.clone()),
            timeout_secs,
            cancel,
        )
        .await
        .map_err(|failure| {
            self.step_error("register_handlers", failure, FlowError::HandlerRegistrationFailed)
        })?;
        self.session.advance(FlowState::HandlersRegistered);

        let topic = self.config.messaging.topic.clone();
        run_step(self.provider.subscribe_to_topic(&topic), timeout_secs, cancel)
            .await
            .map_err(|failure| {
                self.step_error("subscribe_to_topic", failure, |err| FlowError::SubscriptionFailed {
                    topic: topic.clone(),
                    source: err,
                })
            })?;
        info!(topic = %self.config.messaging.topic, "topic subscribed");
        self.session.advance(FlowState::TopicSubscribed);

        Ok(FlowState::TopicSubscribed)
    }

    /// Selects a user from the static roster.
    ///
    /// An unknown id leaves the prior selection unchanged. Returns the
    /// selection after the attempt.
    pub fn select_user(&mut self, user_id: &Uuid) -> &UserRecord {
        match self.config.find_user(user_id) {
            Some(user) => {
                let user = user.clone();
                info!(user_id = %user.user_id, name = %user.name, "user selected");
                self.session.select_user(user);
            }
            None => {
                debug!(%user_id, "unknown user id, keeping prior selection");
            }
        }
        self.session.selected_user()
    }

    /// Posts the current (user, token) pair to the backend.
    ///
    /// Issues exactly one POST. The token is sent as currently held in the
    /// session, even if no token fetch has succeeded yet (the backend then
    /// receives an empty token). On an accepted registration the outcome
    /// carries the backend message to surface to the user; a rejected one
    /// carries nothing and has already been logged as a warning.
    pub async fn submit_registration(&self) -> Result<RegistrationOutcome, FlowError> {
        let user_id = self.session.selected_user().user_id.to_string();
        self.backend
            .register_token(&user_id, self.session.token())
            .await
    }

    /// Logs a step failure and maps it into the step-specific error.
    fn step_error(
        &self,
        step: &'static str,
        failure: StepFailure,
        wrap: impl FnOnce(BoxedError) -> FlowError,
    ) -> FlowError {
        let err = match failure {
            StepFailure::Cancelled => FlowError::Cancelled { step },
            StepFailure::Timeout => FlowError::StepTimeout {
                step,
                timeout_secs: self.config.messaging.step_timeout_secs,
            },
            StepFailure::Provider(source) => wrap(source),
        };
        error!(step, %err, "registration flow step failed");
        err
    }
}

//! Notification-registration lifecycle for pushlink.
//!
//! This crate implements the sequence of asynchronous steps an application
//! performs to obtain and register a push-messaging identity with a
//! backend:
//!
//! - permission negotiation with the push-messaging provider
//! - device identity token acquisition
//! - registration of the four notification-lifecycle handlers
//! - topic subscription
//! - posting the (user, token) pair to the registration backend
//!
//! The controller depends on the `MessagingProvider` and
//! `NotificationSink` traits from `pushlink_common`, not on a concrete
//! vendor SDK. Every step carries an explicit timeout and observes a
//! cancellation token; failures are logged and halt the sequence at that
//! step, with no retry and no rollback.
//!
//! # Example
//!
//! ```rust,no_run
//! use pushlink_config::AppConfig;
//! use pushlink_flow::{LoggingSink, RegistrationFlowController};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! async fn run(
//!     provider: Arc<dyn pushlink_common::MessagingProvider<Error = pushlink_common::BoxedError>>,
//! ) -> Result<(), pushlink_flow::FlowError> {
//!     let config = Arc::new(AppConfig::default());
//!     let mut controller =
//!         RegistrationFlowController::new(config, provider, Arc::new(LoggingSink::new()))?;
//!     controller.initialize(&CancellationToken::new()).await?;
//!     let outcome = controller.submit_registration().await?;
//!     if let Some(message) = outcome.user_message {
//!         println!("{message}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod controller;
pub mod error;
pub mod session;
pub mod sink;

pub use backend::BackendClient;
pub use controller::RegistrationFlowController;
pub use error::FlowError;
pub use session::{FlowState, SessionState};
pub use sink::LoggingSink;

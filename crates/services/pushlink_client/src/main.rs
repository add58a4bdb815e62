// File: services/pushlink_client/src/main.rs
//
// Demo client: runs the notification-registration lifecycle end to end
// against the configured backend. An optional argv[1] selects a user from
// the static roster by id before the token is registered. Ctrl-C cancels
// in-flight initialization.

use pushlink_common::{logging, NotificationSink, RemoteMessage};
use pushlink_config::load_config;
use pushlink_fcm::FcmProvider;
use pushlink_flow::{FlowState, RegistrationFlowController};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

/// Sink that surfaces notices on stdout in addition to the diagnostic log.
struct StdoutSink;

impl StdoutSink {
    fn notice(&self, text: &str, message: &RemoteMessage) {
        println!("{text}");
        info!(message_id = ?message.message_id, "{text}");
    }
}

impl NotificationSink for StdoutSink {
    fn opened_from_background(&self, message: &RemoteMessage) {
        self.notice("Notification caused app to open from background state", message);
    }

    fn background_message(&self, message: &RemoteMessage) {
        info!(message_id = ?message.message_id, "Message handled in the background");
    }

    fn foreground_message(&self, message: &RemoteMessage) {
        self.notice("A new push message arrived", message);
    }

    fn opened_from_quit(&self, message: &RemoteMessage) {
        self.notice("Notification caused app to open from quit state", message);
    }
}

#[tokio::main]
async fn main() {
    logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));
    let provider = Arc::new(FcmProvider::new(config.messaging.clone()));
    let mut controller =
        RegistrationFlowController::new(config, provider, Arc::new(StdoutSink))
            .expect("Failed to build registration flow controller");

    let cancel = CancellationToken::new();
    let cancel_on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, cancelling initialization");
            cancel_on_ctrl_c.cancel();
        }
    });

    match controller.initialize(&cancel).await {
        Ok(FlowState::PermissionDenied) => {
            // The session continues without notifications.
            warn!("proceeding without notifications");
        }
        Ok(state) => info!(%state, "initialization complete"),
        Err(err) => {
            warn!(%err, "initialization stopped early");
        }
    }

    if let Some(arg) = std::env::args().nth(1) {
        match arg.parse::<Uuid>() {
            Ok(user_id) => {
                let user = controller.select_user(&user_id);
                println!("Selected user: {} ({})", user.name, user.user_id);
            }
            Err(err) => warn!(%err, "argument is not a user id, keeping default selection"),
        }
    }

    match controller.submit_registration().await {
        Ok(outcome) => {
            if let Some(message) = outcome.user_message {
                println!("{message}");
            }
        }
        Err(err) => warn!(%err, "registration submission failed"),
    }
}

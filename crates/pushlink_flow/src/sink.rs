// --- File: crates/pushlink_flow/src/sink.rs ---
//! Default notification sink implementation.

use pushlink_common::{NotificationSink, RemoteMessage};
use tracing::info;

/// A sink that surfaces each notification event as a tracing log entry.
///
/// Useful as-is for headless embeddings and as the diagnostic half of a
/// richer sink; UI embeddings typically wrap it and add their own notice
/// surface.
#[derive(Debug, Default)]
pub struct LoggingSink;

impl LoggingSink {
    pub fn new() -> Self {
        Self
    }
}

fn summary(message: &RemoteMessage) -> String {
    message
        .title
        .clone()
        .or_else(|| message.message_id.clone())
        .unwrap_or_else(|| "(no title)".to_string())
}

impl NotificationSink for LoggingSink {
    fn opened_from_background(&self, message: &RemoteMessage) {
        info!(
            message = %summary(message),
            "Notification caused app to open from background state"
        );
    }

    fn background_message(&self, message: &RemoteMessage) {
        info!(message = %summary(message), "Message handled in the background");
    }

    fn foreground_message(&self, message: &RemoteMessage) {
        info!(message = %summary(message), "A new push message arrived");
    }

    fn opened_from_quit(&self, message: &RemoteMessage) {
        info!(
            message = %summary(message),
            "Notification caused app to open from quit state"
        );
    }
}

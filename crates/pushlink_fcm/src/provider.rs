//! `MessagingProvider` implementation backed by the FCM REST surface.

use crate::client::{FcmClient, FcmError};
use pushlink_common::{
    BoxFuture, BoxedError, MessagingProvider, NotificationSink, PermissionStatus, RemoteMessage,
};
use pushlink_config::MessagingConfig;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

fn boxed(err: FcmError) -> BoxedError {
    BoxedError(Box::new(err))
}

/// FCM-backed messaging provider.
///
/// A headless embedding has no OS permission dialog, so the provider
/// reports the platform-granted status carried in config (authorized when
/// unset). Platform embedders that do own a dialog implement
/// [`MessagingProvider`] themselves.
///
/// The registered sink is held here; the embedding runtime delivers
/// provider events through the `dispatch_*` methods. Delivery guarantees
/// behind those events are out of scope for this crate.
pub struct FcmProvider {
    client: FcmClient,
    permission: PermissionStatus,
    // Token last handed out by get_token; topic subscription applies to it.
    token: RwLock<Option<String>>,
    sink: RwLock<Option<Arc<dyn NotificationSink>>>,
}

impl FcmProvider {
    pub fn new(config: MessagingConfig) -> Self {
        let permission = match config.permission.as_deref() {
            None => PermissionStatus::Authorized,
            Some(value) => value.parse().unwrap_or_else(|err| {
                warn!(%err, "unparseable permission setting, treating as denied");
                PermissionStatus::Denied
            }),
        };

        Self {
            client: FcmClient::new(config),
            permission,
            token: RwLock::new(None),
            sink: RwLock::new(None),
        }
    }

    fn sink(&self) -> Option<Arc<dyn NotificationSink>> {
        self.sink.read().expect("sink lock poisoned").clone()
    }

    /// A notification opened the app from the background.
    pub fn dispatch_opened_from_background(&self, message: &RemoteMessage) {
        match self.sink() {
            Some(sink) => sink.opened_from_background(message),
            None => debug!("dropping opened-from-background event, no sink registered"),
        }
    }

    /// A message arrived while the app was in the background.
    pub fn dispatch_background_message(&self, message: &RemoteMessage) {
        match self.sink() {
            Some(sink) => sink.background_message(message),
            None => debug!("dropping background message, no sink registered"),
        }
    }

    /// A message arrived while the app was in the foreground.
    pub fn dispatch_foreground_message(&self, message: &RemoteMessage) {
        match self.sink() {
            Some(sink) => sink.foreground_message(message),
            None => debug!("dropping foreground message, no sink registered"),
        }
    }

    /// The app was opened from a quit state; `message` is the initial
    /// notification, if any caused the launch.
    pub fn dispatch_initial_notification(&self, message: Option<&RemoteMessage>) {
        let Some(message) = message else {
            return;
        };
        match self.sink() {
            Some(sink) => sink.opened_from_quit(message),
            None => debug!("dropping initial notification, no sink registered"),
        }
    }
}

impl MessagingProvider for FcmProvider {
    type Error = BoxedError;

    fn request_permission(&self) -> BoxFuture<'_, PermissionStatus, BoxedError> {
        let permission = self.permission;
        Box::pin(async move { Ok(permission) })
    }

    fn get_token(&self) -> BoxFuture<'_, String, BoxedError> {
        Box::pin(async move {
            let token = self.client.fetch_device_token().await.map_err(boxed)?;
            *self.token.write().expect("token lock poisoned") = Some(token.clone());
            Ok(token)
        })
    }

    fn subscribe_to_topic(&self, topic: &str) -> BoxFuture<'_, (), BoxedError> {
        let topic = topic.to_string();
        Box::pin(async move {
            // Subscription applies to the token fetched earlier in the flow;
            // fetch one now if the embedder skipped that step.
            let cached = self.token.read().expect("token lock poisoned").clone();
            let token = match cached {
                Some(token) => token,
                None => {
                    let token = self.client.fetch_device_token().await.map_err(boxed)?;
                    *self.token.write().expect("token lock poisoned") = Some(token.clone());
                    token
                }
            };
            self.client
                .subscribe_to_topic(&token, &topic)
                .await
                .map_err(boxed)
        })
    }

    fn register_handlers(&self, sink: Arc<dyn NotificationSink>) -> BoxFuture<'_, (), BoxedError> {
        Box::pin(async move {
            *self.sink.write().expect("sink lock poisoned") = Some(sink);
            Ok(())
        })
    }
}

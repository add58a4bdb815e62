//! End-to-end tests for the registration flow against a mocked backend.

use pushlink_common::{
    BoxFuture, BoxedError, MessagingProvider, NotificationSink, PermissionStatus,
};
use pushlink_config::AppConfig;
use pushlink_flow::{FlowError, FlowState, LoggingSink, RegistrationFlowController};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A provider that always grants permission and hands out a fixed token.
struct StaticProvider {
    token: &'static str,
}

impl MessagingProvider for StaticProvider {
    type Error = BoxedError;

    fn request_permission(&self) -> BoxFuture<'_, PermissionStatus, BoxedError> {
        Box::pin(async { Ok(PermissionStatus::Authorized) })
    }

    fn get_token(&self) -> BoxFuture<'_, String, BoxedError> {
        let token = self.token.to_string();
        Box::pin(async move { Ok(token) })
    }

    fn subscribe_to_topic(&self, _topic: &str) -> BoxFuture<'_, (), BoxedError> {
        Box::pin(async { Ok(()) })
    }

    fn register_handlers(&self, _sink: Arc<dyn NotificationSink>) -> BoxFuture<'_, (), BoxedError> {
        Box::pin(async { Ok(()) })
    }
}

fn controller_against(
    server: &MockServer,
    token: &'static str,
) -> RegistrationFlowController {
    let mut config = AppConfig::default();
    config.backend.base_url = server.uri();
    RegistrationFlowController::new(
        Arc::new(config),
        Arc::new(StaticProvider { token }),
        Arc::new(LoggingSink::new()),
    )
    .expect("controller")
}

#[tokio::test]
async fn accepted_registration_posts_once_and_surfaces_the_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/test-store/fcm-token"))
        .and(body_json(serde_json::json!({
            "user_id": "530709cf-d57d-47ed-ba9a-79212bc9df87",
            "token": "device-token-123",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "OK",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_against(&server, "device-token-123");
    let state = controller.initialize(&CancellationToken::new()).await.unwrap();
    assert_eq!(state, FlowState::TopicSubscribed);

    let outcome = controller.submit_registration().await.unwrap();
    assert!(outcome.accepted);
    assert_eq!(outcome.user_message.as_deref(), Some("OK"));
}

#[tokio::test]
async fn rejected_registration_surfaces_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/test-store/fcm-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "bad token",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_against(&server, "device-token-123");
    controller.initialize(&CancellationToken::new()).await.unwrap();

    let outcome = controller.submit_registration().await.unwrap();
    assert!(!outcome.accepted);
    assert!(outcome.user_message.is_none());
}

#[tokio::test]
async fn submission_without_prior_token_fetch_sends_an_empty_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/test-store/fcm-token"))
        .and(body_json(serde_json::json!({
            "user_id": "530709cf-d57d-47ed-ba9a-79212bc9df87",
            "token": "",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "empty token",
        })))
        .expect(1)
        .mount(&server)
        .await;

    // No initialize() call: the session still holds an empty token.
    let controller = controller_against(&server, "unused");
    let outcome = controller.submit_registration().await.unwrap();
    assert!(!outcome.accepted);
}

#[tokio::test]
async fn malformed_backend_response_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/test-store/fcm-token"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let mut controller = controller_against(&server, "device-token-123");
    controller.initialize(&CancellationToken::new()).await.unwrap();

    let err = controller.submit_registration().await.unwrap_err();
    assert!(matches!(err, FlowError::ResponseParseError(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Nothing is listening on this port.
    let mut config = AppConfig::default();
    config.backend.base_url = "http://127.0.0.1:9".to_string();
    config.backend.request_timeout_secs = 2;
    let controller = RegistrationFlowController::new(
        Arc::new(config),
        Arc::new(StaticProvider { token: "unused" }),
        Arc::new(LoggingSink::new()),
    )
    .unwrap();

    let err = controller.submit_registration().await.unwrap_err();
    assert!(matches!(err, FlowError::NetworkError(_)));
}

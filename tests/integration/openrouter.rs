//! Integration tests for the OpenRouter completion client

use portfolio_manager::config::ManagerConfig;
use portfolio_manager::services::{CompletionError, CompletionService, OpenRouterClient};
use portfolio_manager::signals::prompt::ChatMessage;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> OpenRouterClient {
    OpenRouterClient::with_client(
        format!("{}/api/v1/", server.uri()),
        "sk-test".to_string(),
        "test/model".to_string(),
        reqwest::Client::new(),
    )
}

fn messages() -> Vec<ChatMessage> {
    vec![ChatMessage::system("instruction"), ChatMessage::user("data")]
}

#[tokio::test]
async fn returns_first_choice_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "test/model",
            "messages": [
                {"role": "system", "content": "instruction"},
                {"role": "user", "content": "data"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "{\"action\":\"hold\"}"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let content = client(&server).complete(&messages()).await.unwrap();
    assert_eq!(content, "{\"action\":\"hold\"}");
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    match client(&server).complete(&messages()).await {
        Err(CompletionError::Status { status, body }) => {
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_and_blank_content_are_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "   "}}]
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(matches!(
        client.complete(&messages()).await,
        Err(CompletionError::EmptyResponse)
    ));
    assert!(matches!(
        client.complete(&messages()).await,
        Err(CompletionError::EmptyResponse)
    ));
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    assert!(matches!(
        client(&server).complete(&messages()).await,
        Err(CompletionError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn unreachable_provider_is_network_error() {
    let client = OpenRouterClient::with_client(
        "http://127.0.0.1:9".to_string(),
        "sk-test".to_string(),
        "test/model".to_string(),
        reqwest::Client::new(),
    );
    assert!(matches!(
        client.complete(&messages()).await,
        Err(CompletionError::Network(_))
    ));
}

#[test]
fn no_api_key_means_no_client() {
    let config = ManagerConfig::default();
    assert!(OpenRouterClient::from_config(&config).unwrap().is_none());

    let config = ManagerConfig {
        api_key: Some("sk-test".to_string()),
        ..ManagerConfig::default()
    };
    let client = OpenRouterClient::from_config(&config).unwrap().unwrap();
    assert_eq!(client.model(), config.model);
}

use deepchat::api::{CompletionBackend, CompletionClient};
use deepchat::models::{ContentPart, Message};
use deepchat::ChatError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(server: &MockServer) -> String {
    format!("{}/api/v1/chat/completions", server.uri())
}

fn history() -> Vec<Message> {
    vec![Message::user(vec![ContentPart::text("hi")])]
}

#[tokio::test]
async fn test_complete_sends_model_and_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "model": "qwen/qwen3-coder:free",
            "messages": [
                {"role": "user", "content": [{"type": "text", "text": "hi"}]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "hello there"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CompletionClient::new("sk-test", endpoint(&server)).unwrap();
    let reply = client
        .complete("qwen/qwen3-coder:free", &history())
        .await
        .unwrap();

    assert_eq!(reply, "hello there");
}

#[tokio::test]
async fn test_complete_non_success_status_is_response_format_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "Rate limit exceeded", "code": 429}
        })))
        .mount(&server)
        .await;

    let client = CompletionClient::new("sk-test", endpoint(&server)).unwrap();
    let err = client.complete("m", &history()).await.unwrap_err();

    match err {
        ChatError::ResponseFormat(message) => {
            assert_eq!(message, "status 429: Rate limit exceeded");
        }
        other => panic!("expected ResponseFormat error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_complete_server_error_with_plain_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = CompletionClient::new("sk-test", endpoint(&server)).unwrap();
    let err = client.complete("m", &history()).await.unwrap_err();

    assert!(matches!(err, ChatError::ResponseFormat(ref message) if message == "status 500: boom"));
    assert!(err.is_remote());
}

#[tokio::test]
async fn test_complete_malformed_body_is_response_format_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = CompletionClient::new("sk-test", endpoint(&server)).unwrap();
    let err = client.complete("m", &history()).await.unwrap_err();

    assert!(matches!(err, ChatError::ResponseFormat(_)));
}

#[tokio::test]
async fn test_complete_missing_choices_is_response_format_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = CompletionClient::new("sk-test", endpoint(&server)).unwrap();
    let err = client.complete("m", &history()).await.unwrap_err();

    assert!(matches!(err, ChatError::ResponseFormat(_)));
}

#[tokio::test]
async fn test_complete_unreachable_host_is_transport_error() {
    // Grab a free port and release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let url = format!("http://127.0.0.1:{}/v1/chat/completions", port);

    let client = CompletionClient::new("sk-test", url).unwrap();
    let err = client.complete("m", &history()).await.unwrap_err();

    assert!(matches!(err, ChatError::Transport(_)));
    assert!(err.is_remote());
}

#[test]
fn test_invalid_api_key_header_is_config_error() {
    let result = CompletionClient::new("bad\nkey", "http://localhost/v1/chat/completions");
    assert!(matches!(result, Err(ChatError::ConfigError(_))));
}

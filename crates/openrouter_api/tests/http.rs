use std::time::Duration;

use openrouter_api::{ChatCompletionRequest, ChatMessage, OpenRouterClient, OpenRouterConfig, OpenRouterError};

#[test]
fn http_request_targets_chat_completions_endpoint() {
    let config = OpenRouterConfig::new("sk-or-test").with_base_url("https://openrouter.ai/api/v1");
    let client = OpenRouterClient::new(config).expect("client");
    let mut request = ChatCompletionRequest::new("openai/gpt-4o", vec![ChatMessage::user("hi")]);
    request.stream = true;

    let http_request = client
        .build_request(&request)
        .expect("build request")
        .build()
        .expect("request");

    assert_eq!(
        http_request.url().as_str(),
        "https://openrouter.ai/api/v1/chat/completions"
    );
    assert_eq!(http_request.method(), "POST");
    assert_eq!(
        http_request
            .headers()
            .get("authorization")
            .and_then(|value| value.to_str().ok()),
        Some("Bearer sk-or-test")
    );

    let body = http_request
        .body()
        .and_then(|body| body.as_bytes())
        .expect("json body");
    let body: serde_json::Value = serde_json::from_slice(body).expect("body is json");
    assert_eq!(body["stream"], false);
    assert_eq!(body["model"], "openai/gpt-4o");
}

#[test]
fn http_client_requires_api_key() {
    let error = OpenRouterClient::new(OpenRouterConfig::new("")).expect_err("missing key");
    assert!(matches!(error, OpenRouterError::MissingApiKey));
}

#[test]
fn http_client_rejects_invalid_base_url() {
    let config = OpenRouterConfig::new("key").with_base_url("not a url");
    let error = OpenRouterClient::new(config).expect_err("invalid url");
    assert!(matches!(error, OpenRouterError::InvalidBaseUrl(_)));
}

#[test]
fn http_client_keeps_configured_timeout() {
    let config = OpenRouterConfig::new("key").with_timeout(Duration::from_secs(30));
    let client = OpenRouterClient::new(config).expect("client");
    assert_eq!(client.config().timeout, Some(Duration::from_secs(30)));
}

#[tokio::test]
async fn http_unreachable_endpoint_fails_without_panicking() {
    let config = OpenRouterConfig::new("key")
        .with_base_url("http://127.0.0.1:9/v1")
        .with_timeout(Duration::from_millis(200));
    let client = OpenRouterClient::new(config).expect("client");
    let request = ChatCompletionRequest::new("openai/gpt-4o", vec![ChatMessage::user("hi")]);

    let result = tokio::time::timeout(Duration::from_secs(30), client.complete(&request)).await;
    let error = result
        .expect("retries should finish within the outer timeout")
        .expect_err("nothing listens on the discard port");
    assert!(matches!(
        error,
        OpenRouterError::Timeout | OpenRouterError::RetryExhausted { .. }
    ));
}

use openrouter_api::client::parse_completion_body;
use openrouter_api::error::parse_error_message;
use openrouter_api::OpenRouterError;
use reqwest::StatusCode;

#[test]
fn error_message_prefers_json_error_message() {
    let body = r#"{"error":{"message":"No auth credentials found","code":401}}"#;
    assert_eq!(
        parse_error_message(StatusCode::UNAUTHORIZED, body),
        "No auth credentials found"
    );
}

#[test]
fn error_message_falls_back_to_raw_body_then_reason() {
    assert_eq!(
        parse_error_message(StatusCode::BAD_GATEWAY, "upstream exploded"),
        "upstream exploded"
    );
    assert_eq!(
        parse_error_message(StatusCode::BAD_GATEWAY, ""),
        "Bad Gateway"
    );
    assert_eq!(
        parse_error_message(StatusCode::BAD_REQUEST, r#"{"error":{"code":400}}"#),
        r#"{"error":{"code":400}}"#
    );
}

#[test]
fn error_display_includes_status_and_message() {
    let error = OpenRouterError::Status {
        status: StatusCode::TOO_MANY_REQUESTS,
        message: "slow down".to_string(),
    };
    let text = error.to_string();
    assert!(text.contains("429"));
    assert!(text.contains("slow down"));
}

#[test]
fn error_retry_exhausted_display_reports_last_error() {
    let error = OpenRouterError::RetryExhausted {
        status: None,
        last_error: Some("connection refused".to_string()),
    };
    assert_eq!(
        error.to_string(),
        "request failed after retries (last status: none): connection refused"
    );
}

#[test]
fn completion_body_in_band_error_maps_to_model_error() {
    let body = r#"{"error":{"message":"Provider returned error","code":502}}"#;
    let error = parse_completion_body(body).expect_err("in-band error");

    match error {
        OpenRouterError::Model { code, message } => {
            assert_eq!(code.as_deref(), Some("502"));
            assert_eq!(message, "Provider returned error");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn completion_body_decodes_first_choice_content() {
    let body = r#"{
        "id": "gen-1",
        "model": "openai/gpt-4o",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": "Both sides have merit." }, "finish_reason": "stop" }
        ],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    }"#;

    let response = parse_completion_body(body).expect("valid completion");
    assert_eq!(response.first_content(), Some("Both sides have merit."));
    assert_eq!(response.finish_reason(), Some("stop"));
    assert_eq!(response.usage.map(|usage| usage.total_tokens), Some(15));
}

#[test]
fn completion_body_blank_content_is_not_reported() {
    let body = r#"{"choices":[{"message":{"role":"assistant","content":"   "}}]}"#;
    let response = parse_completion_body(body).expect("valid completion");
    assert_eq!(response.first_content(), None);
}

#[test]
fn completion_body_rejects_non_json() {
    let error = parse_completion_body("<html>oops</html>").expect_err("not json");
    assert!(matches!(error, OpenRouterError::Decode(_)));
}

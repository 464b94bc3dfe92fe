use openrouter_api::normalize_chat_completions_url;
use openrouter_api::url::{resolve_endpoint, DEFAULT_OPENROUTER_BASE_URL};

#[test]
fn url_blank_input_uses_default_base() {
    assert_eq!(
        normalize_chat_completions_url("  "),
        format!("{DEFAULT_OPENROUTER_BASE_URL}/chat/completions")
    );
}

#[test]
fn url_appends_chat_completions_to_api_root() {
    assert_eq!(
        normalize_chat_completions_url("https://openrouter.ai/api/v1/"),
        "https://openrouter.ai/api/v1/chat/completions"
    );
}

#[test]
fn url_completes_partial_chat_path() {
    assert_eq!(
        normalize_chat_completions_url("http://localhost:8080/v1/chat"),
        "http://localhost:8080/v1/chat/completions"
    );
}

#[test]
fn url_keeps_full_endpoint_unchanged() {
    assert_eq!(
        normalize_chat_completions_url("https://proxy.internal/v1/chat/completions//"),
        "https://proxy.internal/v1/chat/completions"
    );
}

#[test]
fn resolve_endpoint_rejects_non_http_schemes() {
    let error = resolve_endpoint("ftp://openrouter.ai/api/v1").expect_err("ftp is not allowed");
    assert!(error.to_string().contains("unsupported scheme 'ftp'"));
}

#[test]
fn resolve_endpoint_rejects_relative_urls() {
    assert!(resolve_endpoint("api/v1").is_err());
}

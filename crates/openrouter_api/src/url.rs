use crate::error::OpenRouterError;

/// Default base URL for OpenRouter requests.
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Normalize a base URL to the chat-completions endpoint.
///
/// Normalization rules:
/// 1) blank input falls back to [`DEFAULT_OPENROUTER_BASE_URL`]
/// 2) keep `/chat/completions` unchanged
/// 3) append `/completions` when path ends in `/chat`
/// 4) append `/chat/completions` otherwise
pub fn normalize_chat_completions_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_OPENROUTER_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with(CHAT_COMPLETIONS_PATH) {
        return trimmed.to_string();
    }
    if trimmed.ends_with("/chat") {
        return format!("{trimmed}/completions");
    }
    format!("{trimmed}{CHAT_COMPLETIONS_PATH}")
}

/// Normalizes and validates an endpoint as an absolute http(s) URL.
pub fn resolve_endpoint(input: &str) -> Result<::url::Url, OpenRouterError> {
    let normalized = normalize_chat_completions_url(input);
    let parsed = ::url::Url::parse(&normalized)
        .map_err(|error| OpenRouterError::InvalidBaseUrl(format!("{normalized}: {error}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(OpenRouterError::InvalidBaseUrl(format!(
            "{normalized}: unsupported scheme '{scheme}'"
        ))),
    }
}

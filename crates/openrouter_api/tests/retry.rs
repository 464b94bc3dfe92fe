use std::time::Duration;

use openrouter_api::retry::{is_retryable_http_error, retry_delay, BASE_DELAY_MS};

#[test]
fn retry_transient_statuses_are_retryable() {
    for status in [408, 429, 500, 502, 503, 504] {
        assert!(is_retryable_http_error(status, ""), "status {status}");
    }
}

#[test]
fn retry_client_errors_are_not_retryable_without_transient_text() {
    assert!(!is_retryable_http_error(400, "invalid model"));
    assert!(!is_retryable_http_error(401, "No auth credentials found"));
}

#[test]
fn retry_transient_error_text_is_retryable_for_any_status() {
    assert!(is_retryable_http_error(400, "Rate limit exceeded"));
    assert!(is_retryable_http_error(400, "provider overloaded"));
    assert!(is_retryable_http_error(418, "upstream connect error"));
}

#[test]
fn retry_delay_grows_exponentially() {
    assert_eq!(retry_delay(0), Duration::from_millis(BASE_DELAY_MS));
    assert_eq!(retry_delay(1), Duration::from_millis(BASE_DELAY_MS * 2));
    assert_eq!(retry_delay(3), Duration::from_millis(BASE_DELAY_MS * 8));
}

#[test]
fn retry_delay_saturates_instead_of_overflowing() {
    assert!(retry_delay(u32::MAX) >= retry_delay(30));
}

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use crate::config::OpenRouterConfig;
use crate::error::{code_to_string, parse_error_message, OpenRouterError};
use crate::headers::build_headers;
use crate::payload::{ChatCompletionRequest, ChatCompletionResponse};
use crate::retry::{is_retryable_http_error, retry_delay, MAX_RETRIES};
use crate::url::resolve_endpoint;

#[derive(Debug)]
pub struct OpenRouterClient {
    http: Client,
    config: OpenRouterConfig,
    endpoint: ::url::Url,
}

impl OpenRouterClient {
    pub fn new(config: OpenRouterConfig) -> Result<Self, OpenRouterError> {
        if config.api_key.trim().is_empty() {
            return Err(OpenRouterError::MissingApiKey);
        }

        let endpoint = resolve_endpoint(&config.base_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(OpenRouterError::from)?;

        Ok(Self {
            http,
            config,
            endpoint,
        })
    }

    pub fn config(&self) -> &OpenRouterConfig {
        &self.config
    }

    /// Fully-qualified chat-completions URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    pub fn build_headers(&self) -> Result<HeaderMap, OpenRouterError> {
        let headers = build_headers(&self.config)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes())
                    .map_err(|_| OpenRouterError::InvalidHeader(format!("invalid key: {key}")))?,
                HeaderValue::from_str(&value).map_err(|_| {
                    OpenRouterError::InvalidHeader(format!("invalid value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<reqwest::RequestBuilder, OpenRouterError> {
        let headers = self.build_headers()?;
        let mut payload = request.clone();
        payload.stream = false;

        Ok(self
            .http
            .post(self.endpoint.clone())
            .headers(headers)
            .json(&payload))
    }

    pub async fn send_with_retry(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<Response, OpenRouterError> {
        let mut last_status: Option<StatusCode> = None;
        let mut last_error = None;

        for attempt in 0..=MAX_RETRIES {
            debug!(model = %request.model, attempt, "sending chat completion request");

            match self.build_request(request)?.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    last_status = Some(status);
                    let body = response.text().await.unwrap_or_default();
                    let message = parse_error_message(status, &body);
                    last_error = Some(message.clone());

                    if attempt < MAX_RETRIES && is_retryable_http_error(status.as_u16(), &body) {
                        warn!(%status, attempt, error = %message, "retrying chat completion request");
                        tokio::time::sleep(retry_delay(attempt)).await;
                        continue;
                    }

                    return Err(OpenRouterError::Status { status, message });
                }
                Err(error) => {
                    let error = OpenRouterError::from(error);
                    if matches!(error, OpenRouterError::Timeout) {
                        return Err(error);
                    }

                    let message = error.to_string();
                    last_error = Some(message.clone());
                    if attempt < MAX_RETRIES {
                        warn!(attempt, error = %message, "retrying chat completion request");
                        tokio::time::sleep(retry_delay(attempt)).await;
                        continue;
                    }
                }
            }
        }

        Err(OpenRouterError::RetryExhausted {
            status: last_status,
            last_error,
        })
    }

    /// Sends `request` and decodes the completion document.
    ///
    /// In-band error objects are surfaced as [`OpenRouterError::Model`].
    pub async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenRouterError> {
        let response = self.send_with_retry(request).await?;
        let body = response.text().await.map_err(OpenRouterError::from)?;
        let parsed = parse_completion_body(&body)?;

        debug!(
            model = parsed.model.as_deref().unwrap_or(&request.model),
            choices = parsed.choices.len(),
            "received chat completion"
        );

        Ok(parsed)
    }
}

/// Decodes a completion body, mapping in-band `error` objects to errors.
pub fn parse_completion_body(body: &str) -> Result<ChatCompletionResponse, OpenRouterError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)?;

    if let Some(error) = &parsed.error {
        return Err(OpenRouterError::Model {
            code: error.code.as_ref().and_then(code_to_string),
            message: error
                .message
                .clone()
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| "unknown model error".to_string()),
        });
    }

    Ok(parsed)
}

use std::collections::BTreeMap;
use std::time::Duration;

use crate::url::DEFAULT_OPENROUTER_BASE_URL;

/// Default application title advertised through `X-Title`.
pub const DEFAULT_APP_TITLE: &str = "Double Agent";

/// Transport configuration for OpenRouter requests.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// API key passed as a bearer token in `Authorization`.
    pub api_key: String,
    /// Base URL for OpenRouter endpoints.
    pub base_url: String,
    /// Application title reported through `X-Title`.
    pub app_title: String,
    /// Optional `HTTP-Referer` attribution value.
    pub referer: Option<String>,
    /// Additional headers merged into request headers.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional request timeout.
    pub timeout: Option<Duration>,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
            app_title: DEFAULT_APP_TITLE.to_string(),
            referer: None,
            extra_headers: BTreeMap::new(),
            timeout: None,
        }
    }
}

impl OpenRouterConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_app_title(mut self, app_title: impl Into<String>) -> Self {
        self.app_title = app_title.into();
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }
}

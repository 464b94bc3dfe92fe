//! OpenRouter-backed implementation of the shared `agent_runner` contract.
//!
//! This adapter translates one `RunRequest` into a chat-completions call via
//! `openrouter_api` and narrates the request lifecycle as progress steps.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use agent_runner::{RunError, RunMessage, RunRequest, Runner, RunnerInitError, RunnerProfile};
use openrouter_api::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CompletionPlugin,
    OpenRouterClient, OpenRouterConfig, OpenRouterError,
};
use tracing::{debug, info};

/// Stable runner identifier used by startup selection.
pub const OPENROUTER_RUNNER_ID: &str = "openrouter";

/// First narration entry of every run.
pub const PROCESSING_STEP: &str = "Processing your request...";

/// Models offered when none are configured. The first entry is the default.
pub const DEFAULT_MODEL_IDS: [&str; 5] = [
    "qwen/qwen3-235b-a22b-2507",
    "deepseek/deepseek-r1-0528",
    "anthropic/claude-3.5-sonnet",
    "openai/gpt-4o",
    "meta-llama/llama-3.3-70b-instruct",
];

/// Runtime configuration for the OpenRouter runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRouterRunnerConfig {
    pub api_key: String,
    pub model_ids: Vec<String>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
    pub web_search: bool,
}

impl OpenRouterRunnerConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model_ids: DEFAULT_MODEL_IDS.iter().map(ToString::to_string).collect(),
            base_url: None,
            timeout: None,
            web_search: false,
        }
    }

    #[must_use]
    pub fn with_model_ids(mut self, model_ids: Vec<String>) -> Self {
        self.model_ids = model_ids;
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }

    fn to_openrouter_config(&self) -> OpenRouterConfig {
        let mut config = OpenRouterConfig::new(self.api_key.clone());

        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        config
    }
}

trait CompletionClient: Send + Sync {
    fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenRouterError>;
}

#[derive(Debug)]
struct DefaultCompletionClient {
    client: OpenRouterClient,
}

impl CompletionClient for DefaultCompletionClient {
    fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenRouterError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| {
                OpenRouterError::Runtime(format!("failed to initialize tokio runtime: {error}"))
            })?;

        runtime.block_on(self.client.complete(request))
    }
}

/// `Runner` adapter backed by `openrouter_api` transport primitives.
pub struct OpenRouterRunner {
    model_ids: Vec<String>,
    selection: Mutex<usize>,
    web_search: bool,
    client: Arc<dyn CompletionClient>,
}

impl OpenRouterRunner {
    /// Creates a runner using real OpenRouter transport.
    pub fn new(config: OpenRouterRunnerConfig) -> Result<Self, RunnerInitError> {
        let client = OpenRouterClient::new(config.to_openrouter_config()).map_err(map_init_error)?;

        Ok(Self {
            model_ids: sanitize_model_ids(config.model_ids),
            selection: Mutex::new(0),
            web_search: config.web_search,
            client: Arc::new(DefaultCompletionClient { client }),
        })
    }

    fn selected_model(&self) -> String {
        let index = *lock_unpoisoned(&self.selection);
        self.model_ids[index].clone()
    }

    #[cfg(test)]
    fn with_client_for_tests(
        model_ids: Vec<String>,
        web_search: bool,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            model_ids: sanitize_model_ids(model_ids),
            selection: Mutex::new(0),
            web_search,
            client,
        }
    }
}

impl Runner for OpenRouterRunner {
    fn profile(&self) -> RunnerProfile {
        RunnerProfile {
            runner_id: OPENROUTER_RUNNER_ID.to_string(),
            model_id: self.selected_model(),
        }
    }

    fn cycle_model(&self) -> Result<RunnerProfile, String> {
        let mut selection = lock_unpoisoned(&self.selection);
        *selection = (*selection + 1) % self.model_ids.len();
        drop(selection);

        Ok(self.profile())
    }

    fn select_model(&self, model_id: &str) -> Result<RunnerProfile, String> {
        let model_id = model_id.trim();
        let Some(position) = self.model_ids.iter().position(|id| id == model_id) else {
            return Err(format!(
                "Unknown model '{model_id}'. Available models: {}",
                self.model_ids.join(", ")
            ));
        };

        *lock_unpoisoned(&self.selection) = position;
        Ok(self.profile())
    }

    fn run(
        &self,
        req: RunRequest,
        progress: &mut dyn FnMut(String),
    ) -> Result<String, RunError> {
        progress(PROCESSING_STEP.to_string());

        let model = self.selected_model();
        progress(format!("Querying {model} via OpenRouter"));
        if self.web_search {
            progress("Web search enabled".to_string());
        }

        let request = build_chat_request(&model, &req, self.web_search);
        debug!(run_id = req.run_id, %model, messages = request.messages.len(), "dispatching run");

        let response = self
            .client
            .complete(&request)
            .map_err(|error| RunError::new(format!("OpenRouter request failed: {error}")))?;

        let Some(content) = response.first_content() else {
            return Err(RunError::new(format!("{model} returned an empty response")));
        };

        if response.finish_reason() == Some("length") {
            progress("Response truncated at the model's length limit".to_string());
        }
        info!(run_id = req.run_id, %model, "run answered");

        Ok(content.to_string())
    }
}

/// Builds the chat payload: instructions, prior turns, then the new prompt.
fn build_chat_request(model: &str, req: &RunRequest, web_search: bool) -> ChatCompletionRequest {
    let mut messages = Vec::with_capacity(req.history.len() + 2);

    if !req.instructions.trim().is_empty() {
        messages.push(ChatMessage::system(req.instructions.trim()));
    }

    messages.extend(req.history.iter().map(|message| match message {
        RunMessage::UserText { text } => ChatMessage::user(text.clone()),
        RunMessage::AssistantText { text } => ChatMessage::assistant(text.clone()),
    }));
    messages.push(ChatMessage::user(req.prompt.clone()));

    let request = ChatCompletionRequest::new(model, messages);
    if web_search {
        request.with_plugin(CompletionPlugin::web_search())
    } else {
        request
    }
}

fn sanitize_model_ids(model_ids: Vec<String>) -> Vec<String> {
    let mut sanitized: Vec<String> = Vec::new();
    for value in model_ids {
        let value = value.trim().to_string();
        if !value.is_empty() && !sanitized.contains(&value) {
            sanitized.push(value);
        }
    }

    if sanitized.is_empty() {
        sanitized.push(DEFAULT_MODEL_IDS[0].to_string());
    }

    sanitized
}

fn map_init_error(error: OpenRouterError) -> RunnerInitError {
    RunnerInitError::new(format!("Failed to initialize openrouter runner: {error}"))
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

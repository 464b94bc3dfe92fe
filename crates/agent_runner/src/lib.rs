//! Minimal backend-agnostic contract for executing a single prompt run.
//!
//! A runner receives one prompt (plus the conversation that preceded it),
//! narrates its progress through a caller-supplied callback, and either
//! returns the final answer text or an error description. Transport details
//! and transcript bookkeeping live elsewhere.

use std::fmt;

/// Identifier for one run.
pub type RunId = u64;

/// Error returned while constructing/configuring a runner before any run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerInitError {
    message: String,
}

impl RunnerInitError {
    /// Creates a new runner initialization error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RunnerInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RunnerInitError {}

impl From<String> for RunnerInitError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for RunnerInitError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Failure produced by a runner while executing a run.
///
/// The description is surfaced to the user verbatim inside the terminal
/// assistant message, so it should read as a short sentence fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunError {
    description: String,
}

impl RunError {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl std::error::Error for RunError {}

impl From<String> for RunError {
    fn from(description: String) -> Self {
        Self::new(description)
    }
}

impl From<&str> for RunError {
    fn from(description: &str) -> Self {
        Self::new(description)
    }
}

/// Backend-neutral conversation history item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMessage {
    UserText { text: String },
    AssistantText { text: String },
}

impl RunMessage {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::UserText { text } | Self::AssistantText { text } => text,
        }
    }
}

/// Input required to start a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub run_id: RunId,
    /// Prompt submitted for this run.
    pub prompt: String,
    /// Conversation that preceded `prompt`, oldest first.
    pub history: Vec<RunMessage>,
    pub instructions: String,
}

impl RunRequest {
    /// Creates a request with no prior history and no instructions.
    #[must_use]
    pub fn new(run_id: RunId, prompt: impl Into<String>) -> Self {
        Self {
            run_id,
            prompt: prompt.into(),
            history: Vec::new(),
            instructions: String::new(),
        }
    }

    #[must_use]
    pub fn with_history(mut self, history: Vec<RunMessage>) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }
}

/// Immutable metadata describing a runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerProfile {
    pub runner_id: String,
    pub model_id: String,
}

/// Capability that executes one prompt-to-response cycle.
pub trait Runner: Send + Sync + 'static {
    /// Returns runner/model identity metadata.
    fn profile(&self) -> RunnerProfile;

    /// Cycles to the next model selection for future runs.
    ///
    /// Runners may return an error when model cycling is unsupported.
    fn cycle_model(&self) -> Result<RunnerProfile, String> {
        Err("Model cycling is not supported by this runner".to_string())
    }

    /// Selects an explicit model for future runs.
    fn select_model(&self, model_id: &str) -> Result<RunnerProfile, String> {
        Err(format!(
            "Cannot select model '{model_id}': model selection is not supported by this runner"
        ))
    }

    /// Executes a run request.
    ///
    /// `progress` may be called any number of times, in order, to narrate
    /// intermediate status. A runner that never reports progress is valid.
    fn run(
        &self,
        req: RunRequest,
        progress: &mut dyn FnMut(String),
    ) -> Result<String, RunError>;
}

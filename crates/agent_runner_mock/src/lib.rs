//! Deterministic mock implementation of the shared `agent_runner` contract.
//!
//! This crate contains no transport logic and is intended for local
//! development and controller-level testing.

use std::sync::{Mutex, MutexGuard};

use agent_runner::{RunError, RunRequest, Runner, RunnerProfile};

/// Stable runner identifier used for explicit startup selection.
pub const MOCK_RUNNER_ID: &str = "mock";

/// Progress narration reported by the default echo runner.
pub const ECHO_PROGRESS_STEP: &str = "Processing your request...";

/// Terminal behavior of a [`MockRunner`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOutcome {
    /// Return the prompt prefixed with `You said: `.
    Echo,
    /// Return a fixed answer.
    Answer(String),
    /// Fail with a fixed error description.
    Failure(String),
    /// Panic mid-run. Exercises the controller's unwind handling.
    Panic(String),
}

/// Deterministic runner that reports scripted progress and then resolves
/// with a scripted outcome.
#[derive(Debug)]
pub struct MockRunner {
    steps: Vec<String>,
    outcome: MockOutcome,
    model_ids: Vec<String>,
    model_index: Mutex<usize>,
    requests: Mutex<Vec<RunRequest>>,
}

impl MockRunner {
    /// Creates a mock runner with explicit progress steps and outcome.
    #[must_use]
    pub fn new(steps: Vec<String>, outcome: MockOutcome) -> Self {
        Self::with_model_ids(
            steps,
            outcome,
            vec!["mock".to_string(), "mock-alt".to_string()],
        )
    }

    /// Creates a mock runner with explicit model cycling options.
    #[must_use]
    pub fn with_model_ids(steps: Vec<String>, outcome: MockOutcome, model_ids: Vec<String>) -> Self {
        Self {
            steps,
            outcome,
            model_ids: sanitize_model_ids(model_ids),
            model_index: Mutex::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Reports `steps`, then returns `answer`.
    #[must_use]
    pub fn answering<S: Into<String>>(
        steps: impl IntoIterator<Item = S>,
        answer: impl Into<String>,
    ) -> Self {
        Self::new(
            steps.into_iter().map(Into::into).collect(),
            MockOutcome::Answer(answer.into()),
        )
    }

    /// Reports `steps`, then fails with `error`.
    #[must_use]
    pub fn failing<S: Into<String>>(
        steps: impl IntoIterator<Item = S>,
        error: impl Into<String>,
    ) -> Self {
        Self::new(
            steps.into_iter().map(Into::into).collect(),
            MockOutcome::Failure(error.into()),
        )
    }

    /// Reports `steps`, then panics with `message`.
    #[must_use]
    pub fn panicking<S: Into<String>>(
        steps: impl IntoIterator<Item = S>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            steps.into_iter().map(Into::into).collect(),
            MockOutcome::Panic(message.into()),
        )
    }

    /// Returns every request this runner has received, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RunRequest> {
        lock_unpoisoned(&self.requests).clone()
    }

    fn profile_for_index(&self, index: usize) -> RunnerProfile {
        RunnerProfile {
            runner_id: MOCK_RUNNER_ID.to_string(),
            model_id: self.model_ids[index].clone(),
        }
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new(vec![ECHO_PROGRESS_STEP.to_string()], MockOutcome::Echo)
    }
}

impl Runner for MockRunner {
    fn profile(&self) -> RunnerProfile {
        let index = *lock_unpoisoned(&self.model_index);
        self.profile_for_index(index)
    }

    fn cycle_model(&self) -> Result<RunnerProfile, String> {
        let mut index = lock_unpoisoned(&self.model_index);
        *index = (*index + 1) % self.model_ids.len();
        Ok(self.profile_for_index(*index))
    }

    fn select_model(&self, model_id: &str) -> Result<RunnerProfile, String> {
        let Some(position) = self.model_ids.iter().position(|id| id == model_id.trim()) else {
            return Err(format!(
                "Unknown model '{}'. Available models: {}",
                model_id.trim(),
                self.model_ids.join(", ")
            ));
        };

        *lock_unpoisoned(&self.model_index) = position;
        Ok(self.profile_for_index(position))
    }

    fn run(
        &self,
        req: RunRequest,
        progress: &mut dyn FnMut(String),
    ) -> Result<String, RunError> {
        let prompt = req.prompt.clone();
        lock_unpoisoned(&self.requests).push(req);

        for step in &self.steps {
            progress(step.clone());
        }

        match &self.outcome {
            MockOutcome::Echo => Ok(format!("You said: {prompt}")),
            MockOutcome::Answer(answer) => Ok(answer.clone()),
            MockOutcome::Failure(error) => Err(RunError::new(error.clone())),
            MockOutcome::Panic(message) => panic!("{message}"),
        }
    }
}

fn sanitize_model_ids(model_ids: Vec<String>) -> Vec<String> {
    let mut sanitized: Vec<String> = model_ids
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect();

    if sanitized.is_empty() {
        sanitized.push("mock".to_string());
    }

    sanitized
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

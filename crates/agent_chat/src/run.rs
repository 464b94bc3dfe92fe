use agent_runner::RunId;
use session_store::{Message, SessionKey};
use tracing::{debug, info, warn};

use crate::controller::ChatController;

/// Final step-log entry of a successful run.
pub const COMPLETED_STEP: &str = "Task completed successfully!";

/// Failure recorded when a handle is dropped before reaching a terminal state.
pub const RUN_ENDED_WITHOUT_RESULT: &str = "run ended without a result";

/// Failure recorded when the runner panics.
pub const RUNNER_PANICKED: &str = "runner panicked";

/// Step-log entry recorded for a failed run.
#[must_use]
pub fn failure_step(error_description: &str) -> String {
    format!("Error occurred: {error_description}")
}

/// User-facing assistant content for a failed run.
#[must_use]
pub fn failure_content(error_description: &str) -> String {
    format!("I encountered an error: {error_description}")
}

/// Lifecycle notification delivered to the controller's observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Started { run_id: RunId },
    Progress { run_id: RunId, text: String },
    Completed { run_id: RunId, content: String },
    Failed { run_id: RunId, error: String },
}

impl RunEvent {
    #[must_use]
    pub fn run_id(&self) -> RunId {
        match self {
            Self::Started { run_id }
            | Self::Progress { run_id, .. }
            | Self::Completed { run_id, .. }
            | Self::Failed { run_id, .. } => *run_id,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Failed { .. })
    }
}

/// Terminal state a run ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed {
        run_id: RunId,
        content: String,
    },
    Failed {
        run_id: RunId,
        error: String,
        content: String,
    },
}

impl RunOutcome {
    #[must_use]
    pub fn run_id(&self) -> RunId {
        match self {
            Self::Completed { run_id, .. } | Self::Failed { run_id, .. } => *run_id,
        }
    }

    /// Assistant content appended to the transcript.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Completed { content, .. } | Self::Failed { content, .. } => content,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Progress-reporting channel and terminal-state slot of one running run.
///
/// A handle exists only while its run is `Running`. `report_success` and
/// `report_failure` take the handle by value, so a run cannot be finished
/// twice:
///
/// ```compile_fail
/// use agent_chat::{ChatController, SessionKey};
///
/// let mut controller = ChatController::default();
/// let key = SessionKey::default();
/// let handle = controller.begin_run(&key);
/// handle.report_success("first");
/// handle.report_success("second");
/// ```
///
/// Dropping a handle without a terminal report finalizes the run as failed
/// with [`RUN_ENDED_WITHOUT_RESULT`].
pub struct RunHandle<'c> {
    controller: &'c mut ChatController,
    key: SessionKey,
    run_id: RunId,
    progress: Vec<String>,
    finished: bool,
}

impl<'c> RunHandle<'c> {
    pub(crate) fn new(controller: &'c mut ChatController, key: SessionKey, run_id: RunId) -> Self {
        Self {
            controller,
            key,
            run_id,
            progress: Vec::new(),
            finished: false,
        }
    }

    #[must_use]
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    #[must_use]
    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    /// Progress reported so far, in report order.
    #[must_use]
    pub fn progress(&self) -> &[String] {
        &self.progress
    }

    /// Appends `text` to the session step log and to this run's progress buffer.
    pub fn report_progress(&mut self, text: impl Into<String>) {
        let text = text.into();
        debug!(run_id = self.run_id, session = %self.key, step = %text, "run progress");

        self.controller
            .store_mut()
            .append_step(&self.key, text.clone());
        self.progress.push(text.clone());
        self.controller.emit(&RunEvent::Progress {
            run_id: self.run_id,
            text,
        });
    }

    /// Completes the run and appends the assistant answer to the transcript.
    pub fn report_success(mut self, final_text: impl Into<String>) -> RunOutcome {
        self.complete(final_text.into())
    }

    /// Fails the run and appends a user-facing error message to the transcript.
    pub fn report_failure(mut self, error_description: impl Into<String>) -> RunOutcome {
        self.fail(error_description.into())
    }

    fn complete(&mut self, content: String) -> RunOutcome {
        self.finished = true;

        let mut steps = std::mem::take(&mut self.progress);
        steps.push(COMPLETED_STEP.to_string());
        self.finalize(content.clone(), steps);

        info!(run_id = self.run_id, session = %self.key, "run completed");
        self.controller.emit(&RunEvent::Completed {
            run_id: self.run_id,
            content: content.clone(),
        });

        RunOutcome::Completed {
            run_id: self.run_id,
            content,
        }
    }

    fn fail(&mut self, error: String) -> RunOutcome {
        self.finished = true;

        let content = failure_content(&error);
        let mut steps = std::mem::take(&mut self.progress);
        steps.push(failure_step(&error));
        self.finalize(content.clone(), steps);

        warn!(run_id = self.run_id, session = %self.key, %error, "run failed");
        self.controller.emit(&RunEvent::Failed {
            run_id: self.run_id,
            error: error.clone(),
        });

        RunOutcome::Failed {
            run_id: self.run_id,
            error,
            content,
        }
    }

    fn finalize(&mut self, content: String, steps: Vec<String>) {
        let store = self.controller.store_mut();
        store.set_steps(&self.key, steps.clone());
        store.append_message(&self.key, Message::assistant(content, Some(steps)));
    }
}

impl Drop for RunHandle<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.fail(RUN_ENDED_WITHOUT_RESULT.to_string());
        }
    }
}

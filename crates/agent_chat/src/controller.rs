use std::panic::{catch_unwind, AssertUnwindSafe};

use agent_runner::{RunId, RunMessage, RunRequest, Runner};
use session_store::{Message, Role, SessionKey, SessionStore};
use tracing::{debug, info};

use crate::display::DisplayEntry;
use crate::input::InputSource;
use crate::run::{RunEvent, RunHandle, RunOutcome, RUNNER_PANICKED};

/// Callback notified of every run lifecycle event, in order.
pub type RunObserver = Box<dyn FnMut(&RunEvent)>;

/// Drives request/response cycles against an owned [`SessionStore`].
pub struct ChatController {
    store: SessionStore,
    next_run_id: RunId,
    instructions: String,
    observer: Option<RunObserver>,
}

impl Default for ChatController {
    fn default() -> Self {
        Self::new(SessionStore::new())
    }
}

impl ChatController {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            next_run_id: 1,
            instructions: String::new(),
            observer: None,
        }
    }

    /// Sets the system instructions attached to every run request.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Installs the observer that receives live run events.
    pub fn set_observer(&mut self, observer: impl FnMut(&RunEvent) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn into_store(self) -> SessionStore {
        self.store
    }

    /// Returns the transcript for `key` as render-ready entries, in order.
    pub fn render(&self, key: &SessionKey) -> Vec<DisplayEntry<'_>> {
        self.store
            .get_transcript(key)
            .iter()
            .map(DisplayEntry::from)
            .collect()
    }

    /// Step log of the in-flight or most recently finished run for `key`.
    pub fn live_steps(&self, key: &SessionKey) -> &[String] {
        self.store.get_steps(key)
    }

    /// Polls `input` once. Blank submissions count as no input.
    pub fn poll_input(&self, input: &mut dyn InputSource) -> Option<String> {
        input
            .poll_input()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }

    /// Appends a user message so it is visible before the run completes.
    pub fn submit_user_message(&mut self, key: &SessionKey, text: impl Into<String>) {
        let text = text.into();
        debug!(session = %key, chars = text.len(), "user message submitted");
        self.store.append_message(key, Message::user(text));
    }

    /// Opens a run for `key` with a fresh, empty step log.
    pub fn begin_run(&mut self, key: &SessionKey) -> RunHandle<'_> {
        let run_id = self.next_run_id;
        self.next_run_id += 1;

        self.store.set_steps(key, Vec::new());
        info!(run_id, session = %key, "run started");
        self.emit(&RunEvent::Started { run_id });

        RunHandle::new(self, key.clone(), run_id)
    }

    /// Runs one full turn: submit `prompt`, invoke `runner`, record the result.
    pub fn run_turn(&mut self, key: &SessionKey, prompt: &str, runner: &dyn Runner) -> RunOutcome {
        self.submit_user_message(key, prompt);

        let history = self.history_before_last(key);
        let instructions = self.instructions.clone();
        let mut handle = self.begin_run(key);
        let request = RunRequest::new(handle.run_id(), prompt)
            .with_history(history)
            .with_instructions(instructions);

        let result = catch_unwind(AssertUnwindSafe(|| {
            runner.run(request, &mut |text: String| handle.report_progress(text))
        }));

        match result {
            Ok(Ok(answer)) => handle.report_success(answer),
            Ok(Err(error)) => handle.report_failure(error.description()),
            Err(_) => handle.report_failure(RUNNER_PANICKED),
        }
    }

    /// One interaction cycle: poll for input and, when present, run a turn.
    pub fn handle_interaction(
        &mut self,
        key: &SessionKey,
        input: &mut dyn InputSource,
        runner: &dyn Runner,
    ) -> Option<RunOutcome> {
        let prompt = self.poll_input(input)?;
        Some(self.run_turn(key, &prompt, runner))
    }

    /// Starts a new conversation for `key`.
    pub fn clear(&mut self, key: &SessionKey) {
        info!(session = %key, "conversation cleared");
        self.store.clear(key);
    }

    pub(crate) fn store_mut(&mut self) -> &mut SessionStore {
        &mut self.store
    }

    pub(crate) fn emit(&mut self, event: &RunEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(event);
        }
    }

    /// Model-facing history: every transcript message except the newest one.
    fn history_before_last(&self, key: &SessionKey) -> Vec<RunMessage> {
        let transcript = self.store.get_transcript(key);
        let prior = transcript.len().saturating_sub(1);

        transcript[..prior]
            .iter()
            .map(|message| match message.role {
                Role::User => RunMessage::UserText {
                    text: message.content.clone(),
                },
                Role::Assistant => RunMessage::AssistantText {
                    text: message.content.clone(),
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    #[test]
    fn run_ids_are_monotonic_across_sessions() {
        let mut controller = ChatController::default();
        let first = controller.begin_run(&SessionKey::new("a")).report_success("x");
        let second = controller.begin_run(&SessionKey::new("b")).report_success("y");

        assert_eq!(first.run_id(), 1);
        assert_eq!(second.run_id(), 2);
    }

    #[test]
    fn poll_input_trims_and_skips_blank_text() {
        let controller = ChatController::default();
        let mut input = VecDeque::from(vec![" hi ".to_string(), "\t".to_string()]);

        assert_eq!(controller.poll_input(&mut input), Some("hi".to_string()));
        assert_eq!(controller.poll_input(&mut input), None);
        assert_eq!(controller.poll_input(&mut input), None);
    }

    #[test]
    fn history_excludes_the_pending_prompt() {
        let mut controller = ChatController::default();
        let key = SessionKey::default();
        controller.submit_user_message(&key, "only");

        assert!(controller.history_before_last(&key).is_empty());
        assert!(controller.history_before_last(&SessionKey::new("missing")).is_empty());
    }
}

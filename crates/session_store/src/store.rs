use std::collections::HashMap;

use crate::key::SessionKey;
use crate::message::Message;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct SessionState {
    transcript: Vec<Message>,
    steps: Vec<String>,
}

/// Keyed transcript + step-log storage for any number of chat sessions.
///
/// Reading a key that was never initialized yields empty state; every
/// mutating operation initializes the key on first use. Operations on one key
/// never observe or touch another key's state.
#[derive(Debug, Default, Clone)]
pub struct SessionStore {
    sessions: HashMap<SessionKey, SessionState>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates empty state for `key` if absent. Repeated calls are no-ops.
    pub fn ensure_initialized(&mut self, key: &SessionKey) {
        self.state_mut(key);
    }

    #[must_use]
    pub fn contains(&self, key: &SessionKey) -> bool {
        self.sessions.contains_key(key)
    }

    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Returns the transcript for `key` in insertion order.
    #[must_use]
    pub fn get_transcript(&self, key: &SessionKey) -> &[Message] {
        self.sessions
            .get(key)
            .map(|state| state.transcript.as_slice())
            .unwrap_or_default()
    }

    /// Returns the step log of the in-flight or most recently finished run.
    #[must_use]
    pub fn get_steps(&self, key: &SessionKey) -> &[String] {
        self.sessions
            .get(key)
            .map(|state| state.steps.as_slice())
            .unwrap_or_default()
    }

    pub fn append_message(&mut self, key: &SessionKey, message: Message) {
        self.state_mut(key).transcript.push(message);
    }

    /// Replaces the step log for `key` wholesale.
    pub fn set_steps(&mut self, key: &SessionKey, steps: Vec<String>) {
        self.state_mut(key).steps = steps;
    }

    pub fn append_step(&mut self, key: &SessionKey, step: impl Into<String>) {
        self.state_mut(key).steps.push(step.into());
    }

    /// Resets transcript and step log for `key` to empty.
    pub fn clear(&mut self, key: &SessionKey) {
        let state = self.state_mut(key);
        state.transcript.clear();
        state.steps.clear();
    }

    /// Drops every trace of `key`. Returns whether the key existed.
    pub fn end_session(&mut self, key: &SessionKey) -> bool {
        self.sessions.remove(key).is_some()
    }

    fn state_mut(&mut self, key: &SessionKey) -> &mut SessionState {
        self.sessions.entry(key.clone()).or_default()
    }
}

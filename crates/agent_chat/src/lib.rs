//! Chat interaction controller.
//!
//! [`ChatController`] drives one request/response cycle per user turn:
//! it records the user's message, opens a run, hands the prompt to an
//! injected [`Runner`](agent_runner::Runner), streams the runner's progress
//! into the session's step log, and closes the run with exactly one terminal
//! assistant message.
//!
//! Runner failures never escape the controller. Whatever the runner reports
//! (or panics with) becomes a visible assistant message, so the transcript is
//! never left without an answer to the last user turn.
//!
//! Run lifecycle per session key: `Idle -> Running -> {Completed, Failed}`.
//! `Running` is represented by a live [`RunHandle`]; both terminal transitions
//! consume the handle.

pub mod controller;
pub mod display;
pub mod input;
pub mod run;

pub use controller::{ChatController, RunObserver};
pub use display::DisplayEntry;
pub use input::InputSource;
pub use run::{
    failure_content, failure_step, RunEvent, RunHandle, RunOutcome, COMPLETED_STEP,
    RUNNER_PANICKED, RUN_ENDED_WITHOUT_RESULT,
};

pub use agent_runner::RunId;
pub use session_store::{Message, Role, SessionKey, SessionStore};

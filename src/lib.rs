//! Terminal host for the double agent chat.
//!
//! Wires an [`agent_chat::ChatController`] to a runner chosen from the
//! environment and serves a line-oriented chat loop with slash commands.

pub mod app;
pub mod commands;
pub mod config;
pub mod logging;
pub mod runners;
pub mod view;

pub use app::{ChatApp, Flow, LineInput};
pub use config::{ConfigError, EnvConfig, RunnerKind};

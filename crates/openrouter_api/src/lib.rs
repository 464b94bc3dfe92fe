//! Transport-only OpenRouter chat-completions client primitives.
//!
//! This crate owns request building, header assembly, retry policy, and
//! response/error parsing for the OpenAI-compatible `/chat/completions`
//! endpoint. It contains no runner or transcript logic.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod payload;
pub mod retry;
pub mod url;

pub use client::OpenRouterClient;
pub use config::OpenRouterConfig;
pub use error::OpenRouterError;
pub use payload::{
    ChatCompletionChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole,
    CompletionPlugin,
};
pub use crate::url::normalize_chat_completions_url;

//! Environment configuration.

use std::env;
use std::time::Duration;

use session_store::SessionKey;
use thiserror::Error;

pub const RUNNER_ENV_VAR: &str = "DOUBLE_AGENT_RUNNER";
pub const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";
pub const BASE_URL_ENV_VAR: &str = "OPENROUTER_BASE_URL";
pub const MODEL_ENV_VAR: &str = "DOUBLE_AGENT_MODEL";
pub const TIMEOUT_ENV_VAR: &str = "DOUBLE_AGENT_TIMEOUT_SEC";
pub const WEB_SEARCH_ENV_VAR: &str = "DOUBLE_AGENT_WEB_SEARCH";
pub const SESSION_KEY_ENV_VAR: &str = "DOUBLE_AGENT_SESSION_KEY";
pub const SYSTEM_INSTRUCTIONS_ENV_VAR: &str = "DOUBLE_AGENT_SYSTEM_INSTRUCTIONS";

pub const DEFAULT_SYSTEM_INSTRUCTIONS: &str = "You are double_agent, an AI agent helping users to explore opposing views. \
When the user states a position, lay out the strongest arguments on each side, \
separate facts from opinions, and say plainly where the evidence is thin.";

/// Runner backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerKind {
    OpenRouter,
    Mock,
}

impl RunnerKind {
    pub const OPENROUTER_ID: &'static str = "openrouter";
    pub const MOCK_ID: &'static str = "mock";

    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            Self::OPENROUTER_ID => Ok(Self::OpenRouter),
            Self::MOCK_ID => Ok(Self::Mock),
            _ => Err(ConfigError::UnknownRunner(value.trim().to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenRouter => Self::OPENROUTER_ID,
            Self::Mock => Self::MOCK_ID,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unsupported runner '{0}'. Available runners: openrouter, mock")]
    UnknownRunner(String),
    #[error("{TIMEOUT_ENV_VAR} must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub runner: RunnerKind,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout: Option<Duration>,
    pub web_search: bool,
    pub session_key: SessionKey,
    pub system_instructions: String,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let runner = match env_string_opt(RUNNER_ENV_VAR) {
            Some(value) => RunnerKind::parse(&value)?,
            None => RunnerKind::OpenRouter,
        };

        let timeout = env_string_opt(TIMEOUT_ENV_VAR)
            .map(|value| parse_timeout(&value))
            .transpose()?;

        Ok(Self {
            runner,
            api_key: env_string_opt(API_KEY_ENV_VAR),
            base_url: env_string_opt(BASE_URL_ENV_VAR),
            model: env_string_opt(MODEL_ENV_VAR),
            timeout,
            web_search: env_flag(WEB_SEARCH_ENV_VAR),
            session_key: env_string_opt(SESSION_KEY_ENV_VAR)
                .map(SessionKey::new)
                .unwrap_or_default(),
            system_instructions: env_string_opt(SYSTEM_INSTRUCTIONS_ENV_VAR)
                .unwrap_or_else(|| DEFAULT_SYSTEM_INSTRUCTIONS.to_string()),
        })
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Duration::from_secs(seconds)),
        _ => Err(ConfigError::InvalidTimeout(value.to_string())),
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|value| value.trim() == "1")
        .unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

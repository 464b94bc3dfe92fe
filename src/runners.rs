use agent_runner::{Runner, RunnerInitError};
use agent_runner_mock::MockRunner;
use agent_runner_openrouter::{OpenRouterRunner, OpenRouterRunnerConfig, DEFAULT_MODEL_IDS};

use crate::config::{EnvConfig, RunnerKind};

pub const MISSING_API_KEY_MESSAGE: &str =
    "OPENROUTER_API_KEY environment variable is not set. Please set it and restart the application.";

/// Builds the runner selected by `config`.
pub fn runner_from_config(config: &EnvConfig) -> Result<Box<dyn Runner>, RunnerInitError> {
    match config.runner {
        RunnerKind::Mock => Ok(Box::new(MockRunner::default())),
        RunnerKind::OpenRouter => {
            let Some(api_key) = config.api_key.as_deref() else {
                return Err(RunnerInitError::new(MISSING_API_KEY_MESSAGE));
            };

            let runner = OpenRouterRunner::new(openrouter_config(config, api_key))?;
            Ok(Box::new(runner))
        }
    }
}

fn openrouter_config(config: &EnvConfig, api_key: &str) -> OpenRouterRunnerConfig {
    let mut runner_config = OpenRouterRunnerConfig::new(api_key)
        .with_model_ids(model_ids(config.model.as_deref()))
        .with_web_search(config.web_search);

    if let Some(base_url) = &config.base_url {
        runner_config = runner_config.with_base_url(base_url.clone());
    }
    if let Some(timeout) = config.timeout {
        runner_config = runner_config.with_timeout(timeout);
    }

    runner_config
}

/// Default model list, with `preferred` moved to the front when given.
fn model_ids(preferred: Option<&str>) -> Vec<String> {
    let mut ids: Vec<String> = preferred.map(str::to_string).into_iter().collect();
    ids.extend(
        DEFAULT_MODEL_IDS
            .iter()
            .filter(|id| Some(**id) != preferred)
            .map(ToString::to_string),
    );
    ids
}

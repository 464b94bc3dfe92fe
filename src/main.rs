use std::io;
use std::process::ExitCode;

use agent_chat::ChatController;
use double_agent::config::EnvConfig;
use double_agent::{logging, runners, ChatApp, LineInput};

fn main() -> ExitCode {
    logging::init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> io::Result<()> {
    let config = EnvConfig::from_env().map_err(io::Error::other)?;
    let runner = runners::runner_from_config(&config).map_err(io::Error::other)?;
    let controller = ChatController::default().with_instructions(config.system_instructions);

    let mut app = ChatApp::new(controller, runner, config.session_key, io::stdout());
    let mut input = LineInput::new(io::stdin().lock());

    app.run(&mut input)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Clear,
    History,
    /// `/model` cycles; `/model <id>` selects.
    Model(Option<String>),
    Export,
    Quit,
    Unknown(String),
}

pub const HELP_TEXT: &str = "\
Commands:
  /help          show this help
  /clear         start a new conversation
  /history       show the conversation so far
  /model [id]    cycle to the next model, or select one by id
  /export        print the conversation as JSON
  /quit          exit";

pub fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or(trimmed).to_string();
    let argument = parts.next().map(str::to_string);

    let parsed = match command.as_str() {
        "/help" => SlashCommand::Help,
        "/clear" => SlashCommand::Clear,
        "/history" => SlashCommand::History,
        "/model" => SlashCommand::Model(argument),
        "/export" => SlashCommand::Export,
        "/quit" | "/exit" => SlashCommand::Quit,
        _ => SlashCommand::Unknown(command),
    };

    Some(parsed)
}

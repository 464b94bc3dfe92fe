//! Plain-text transcript rendering and JSON export.

use agent_chat::{DisplayEntry, Message, Role, SessionKey};
use serde::Serialize;

pub const TITLE: &str = "Double Agent";
pub const STEPS_HEADER: &str = "Agent Steps";

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Agent",
    }
}

/// Numbered step lines, starting at 1.
pub fn step_line(index: usize, step: &str) -> String {
    format!("Step {index}: {step}")
}

pub fn render_steps(steps: &[String]) -> String {
    let mut out = format!("  {STEPS_HEADER}\n");
    for (index, step) in steps.iter().enumerate() {
        out.push_str("    ");
        out.push_str(&step_line(index + 1, step));
        out.push('\n');
    }
    out
}

pub fn render_entry(entry: &DisplayEntry<'_>) -> String {
    let mut out = format!("{}: {}\n", role_label(entry.role), entry.content);

    if entry.role == Role::Assistant {
        if let Some(steps) = entry.steps.filter(|steps| !steps.is_empty()) {
            out.push_str(&render_steps(steps));
        }
    }

    out
}

pub fn render_transcript(entries: &[DisplayEntry<'_>]) -> String {
    entries
        .iter()
        .map(render_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct TranscriptExport<'a> {
    session_key: &'a SessionKey,
    messages: &'a [Message],
}

/// Serializes a session's transcript as pretty-printed JSON.
pub fn export_transcript(key: &SessionKey, messages: &[Message]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&TranscriptExport {
        session_key: key,
        messages,
    })
}

//! Interactive terminal host around [`ChatController`].

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use agent_chat::{ChatController, InputSource, RunEvent, SessionKey};
use agent_runner::{Runner, RunnerProfile};
use tracing::warn;

use crate::commands::{parse_slash_command, SlashCommand, HELP_TEXT};
use crate::view;

pub const PROMPT: &str = "> ";

/// Line-oriented [`InputSource`] over a buffered reader. End of input yields `None`.
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn poll_input(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(error) => {
                warn!(%error, "failed to read input");
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct ChatApp<W: Write + Send + 'static> {
    controller: ChatController,
    runner: Box<dyn Runner>,
    key: SessionKey,
    output: Arc<Mutex<W>>,
}

impl<W: Write + Send + 'static> ChatApp<W> {
    pub fn new(
        mut controller: ChatController,
        runner: Box<dyn Runner>,
        key: SessionKey,
        output: W,
    ) -> Self {
        let output = Arc::new(Mutex::new(output));
        let live_output = Arc::clone(&output);
        controller.set_observer(move |event| {
            let mut out = lock_unpoisoned(&live_output);
            let _ = write_live_event(&mut *out, event);
        });

        Self {
            controller,
            runner,
            key,
            output,
        }
    }

    pub fn controller(&self) -> &ChatController {
        &self.controller
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    /// Shared handle to the output sink.
    pub fn output(&self) -> Arc<Mutex<W>> {
        Arc::clone(&self.output)
    }

    /// Prints the banner and existing transcript, then serves input until
    /// end of input or `/quit`.
    pub fn run(&mut self, input: &mut dyn InputSource) -> io::Result<()> {
        self.print_banner()?;

        loop {
            self.write(PROMPT)?;
            let Some(line) = input.poll_input() else {
                self.write("\n")?;
                break;
            };

            if self.handle_line(&line)? == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    pub fn print_banner(&mut self) -> io::Result<()> {
        let profile = self.runner.profile();
        self.write(&format!(
            "{}\n{}\nType /help for commands.\n\n",
            view::TITLE,
            describe_profile(&profile)
        ))?;

        let transcript = view::render_transcript(&self.controller.render(&self.key));
        if !transcript.is_empty() {
            self.write(&format!("{transcript}\n"))?;
        }

        Ok(())
    }

    /// Handles one submitted line: a slash command or a chat turn.
    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        if let Some(command) = parse_slash_command(line) {
            return self.handle_command(command);
        }

        let mut pending = VecDeque::from([line.to_string()]);
        let outcome =
            self.controller
                .handle_interaction(&self.key, &mut pending, self.runner.as_ref());

        if outcome.is_some() {
            let rendered = self
                .controller
                .render(&self.key)
                .last()
                .map(view::render_entry)
                .unwrap_or_default();
            self.write(&format!("{rendered}\n"))?;
        }

        Ok(Flow::Continue)
    }

    fn handle_command(&mut self, command: SlashCommand) -> io::Result<Flow> {
        match command {
            SlashCommand::Help => self.write(&format!("{HELP_TEXT}\n"))?,
            SlashCommand::Clear => {
                self.controller.clear(&self.key);
                self.write("Started a new conversation.\n")?;
            }
            SlashCommand::History => {
                let transcript = view::render_transcript(&self.controller.render(&self.key));
                if transcript.is_empty() {
                    self.write("No messages yet.\n")?;
                } else {
                    self.write(&format!("{transcript}\n"))?;
                }
            }
            SlashCommand::Model(model_id) => {
                let result = match model_id {
                    Some(model_id) => self.runner.select_model(&model_id),
                    None => self.runner.cycle_model(),
                };
                match result {
                    Ok(profile) => self.write(&format!("{}\n", describe_profile(&profile)))?,
                    Err(error) => self.write(&format!("{error}\n"))?,
                }
            }
            SlashCommand::Export => {
                let json = view::export_transcript(
                    &self.key,
                    self.controller.store().get_transcript(&self.key),
                )
                .map_err(io::Error::other)?;
                self.write(&format!("{json}\n"))?;
            }
            SlashCommand::Quit => return Ok(Flow::Quit),
            SlashCommand::Unknown(name) => {
                self.write(&format!("Unknown command {name}. Type /help for commands.\n"))?;
            }
        }

        Ok(Flow::Continue)
    }

    fn write(&self, text: &str) -> io::Result<()> {
        let mut out = lock_unpoisoned(&self.output);
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}

fn describe_profile(profile: &RunnerProfile) -> String {
    format!("Runner: {} (model: {})", profile.runner_id, profile.model_id)
}

fn write_live_event(out: &mut dyn Write, event: &RunEvent) -> io::Result<()> {
    match event {
        RunEvent::Started { .. } => writeln!(out, "Agent is working...")?,
        RunEvent::Progress { text, .. } => writeln!(out, "  - {text}")?,
        RunEvent::Completed { .. } | RunEvent::Failed { .. } => writeln!(out)?,
    }
    out.flush()
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

//! Interactive session shell.
//!
//! Reads one command per line and drives a [`ProgressTracker`]. Tracker and
//! parse errors are printed and the session goes on; only I/O failures on
//! the shell's own streams end it.

use crate::command::{Command, HELP};
use crate::render;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};
use waypost_core::{ToolKind, TrackerError};
use waypost_progress::ProgressTracker;
use waypost_storage::Exporter;

/// Whether the shell keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<E: Exporter> {
    tool: ToolKind,
    tracker: ProgressTracker,
    exporter: E,
}

impl<E: Exporter> Shell<E> {
    pub fn new(tool: ToolKind, tracker: ProgressTracker, exporter: E) -> Self {
        Self {
            tool,
            tracker,
            exporter,
        }
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    /// Run until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "{}", self.tool.title())?;
        writeln!(out, "{}", render::block_list(&self.tracker))?;
        writeln!(out, "Type 'help' for commands.")?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(out, "error: {}", err)?;
                    continue;
                }
            };
            if self.execute(command, out).await? == Flow::Quit {
                break;
            }
        }

        debug!("Session {} closed", self.tracker.session());
        Ok(())
    }

    /// Apply one command.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> anyhow::Result<Flow> {
        debug!("Command: {:?}", command);
        let result = match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                Ok(())
            }
            Command::Blocks | Command::Progress => {
                writeln!(out, "{}", render::block_list(&self.tracker))?;
                Ok(())
            }
            Command::Block(target) => {
                let names = self.tracker.structure().blocks().iter().map(|b| b.name.as_str());
                match target.resolve(names) {
                    Some(name) => self.tracker.select_block(&name).map(|_| {
                        let _ = writeln!(out, "Block: {}", name);
                    }),
                    None => Err(TrackerError::BlockNotFound(target.to_string())),
                }
            }
            Command::Modules => self.list_modules(out)?,
            Command::Module(target) => {
                let names: Vec<String> = self
                    .tracker
                    .selected_block()
                    .map(|b| b.modules.iter().map(|m| m.name.clone()).collect())
                    .unwrap_or_default();
                match target.resolve(names.iter().map(String::as_str)) {
                    Some(name) => self.tracker.select_module(&name).map(|_| {
                        let _ = writeln!(out, "Module: {}", name);
                    }),
                    None => match self.tracker.selected_block() {
                        None => Err(TrackerError::NoBlockSelected),
                        Some(block) => Err(TrackerError::ModuleNotFound {
                            block: block.name.clone(),
                            module: target.to_string(),
                        }),
                    },
                }
            }
            Command::Cards => self.list_cards(out)?,
            Command::Card(number) => self
                .tracker
                .open_card(number.saturating_sub(1))
                .and_then(|_| self.show(out)),
            Command::Show => self.show(out),
            Command::Next => self.tracker.advance_current().and_then(|_| self.show(out)),
            Command::Prev => self.tracker.retreat_current().and_then(|_| self.show(out)),
            Command::Answer(text) => self
                .tracker
                .answer_current(text)
                .and_then(|_| self.show(out)),
            Command::Done => self.tracker.mark_current_done().and_then(|_| self.show(out)),
            Command::Export => {
                let session = self.tracker.session_export();
                match self.exporter.export_session(self.tool, &session).await {
                    Ok(path) => writeln!(out, "Exported to {}", path.display())?,
                    Err(err) => {
                        warn!("Export failed: {}", err);
                        writeln!(out, "error: export failed: {}", err)?;
                    }
                }
                Ok(())
            }
        };

        if let Err(err) = result {
            writeln!(out, "error: {}", err)?;
        }
        Ok(Flow::Continue)
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<(), TrackerError> {
        match render::current_card(&self.tracker) {
            Some(text) => {
                let _ = writeln!(out, "{}", text);
                Ok(())
            }
            None => Err(self.missing_selection()),
        }
    }

    fn missing_selection(&self) -> TrackerError {
        let cursor = self.tracker.cursor();
        if cursor.block.is_none() {
            TrackerError::NoBlockSelected
        } else if cursor.module.is_none() {
            TrackerError::NoModuleSelected
        } else {
            TrackerError::CardOutOfRange {
                index: cursor.card,
                len: self.tracker.selected_module().map_or(0, |m| m.cards.len()),
            }
        }
    }

    fn list_modules<W: Write>(&self, out: &mut W) -> std::io::Result<Result<(), TrackerError>> {
        let Some(block) = self.tracker.selected_block() else {
            return Ok(Err(TrackerError::NoBlockSelected));
        };
        for (i, module) in block.modules.iter().enumerate() {
            let flags = self
                .tracker
                .module_completion(&block.name, &module.name)
                .unwrap_or(&[]);
            let done = flags.iter().filter(|f| **f).count();
            writeln!(out, "{:>2}. {} ({}/{})", i + 1, module.name, done, flags.len())?;
        }
        Ok(Ok(()))
    }

    fn list_cards<W: Write>(&self, out: &mut W) -> std::io::Result<Result<(), TrackerError>> {
        let (Some(block), Some(module)) = (self.tracker.selected_block(), self.tracker.selected_module())
        else {
            return Ok(Err(self.missing_selection()));
        };
        for (i, card) in module.cards.iter().enumerate() {
            let done = self
                .tracker
                .is_done(&block.name, &module.name, i)
                .unwrap_or(false);
            writeln!(
                out,
                "{:>2}. [{}] {} ({} steps)",
                i + 1,
                if done { "x" } else { " " },
                card.title,
                card.steps.len()
            )?;
        }
        Ok(Ok(()))
    }
}

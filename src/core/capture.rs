//! Line-oriented capture session.
//!
//! Every non-empty line becomes an entry. Lines starting with the command
//! prefix drive the session instead:
//!
//! - `/task`   flip the task flag for the next entry
//! - `/status` show the flag
//! - `/quit`   end the session (also `/exit`, or end of input)
//!
//! A doubled prefix escapes it: `//path` is captured as `/path`.

use crate::errors::AppResult;
use crate::ledger::NoteStore;
use crate::models::toggle::TaskToggleState;
use log::error;
use std::io::{BufRead, Write};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub captured: usize,
    pub tasks: usize,
    pub failed: usize,
}

pub struct CaptureSession<'a> {
    store: &'a mut NoteStore,
    toggle: TaskToggleState,
    prefix: String,
}

enum Line<'l> {
    Entry(&'l str),
    ToggleTask,
    Status,
    Quit,
    Unknown(&'l str),
    Blank,
}

impl<'a> CaptureSession<'a> {
    pub fn new(store: &'a mut NoteStore, prefix: impl Into<String>) -> Self {
        Self {
            store,
            toggle: TaskToggleState::new(),
            prefix: prefix.into(),
        }
    }

    fn classify<'l>(&self, line: &'l str) -> Line<'l> {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() {
            return Line::Blank;
        }
        let Some(rest) = trimmed.strip_prefix(self.prefix.as_str()) else {
            return Line::Entry(trimmed);
        };
        if rest.starts_with(self.prefix.as_str()) {
            return Line::Entry(rest);
        }
        match rest.trim() {
            "task" | "t" => Line::ToggleTask,
            "status" => Line::Status,
            "quit" | "exit" | "q" => Line::Quit,
            other => Line::Unknown(other),
        }
    }

    /// Read lines from `input` until `/quit` or end of input.
    ///
    /// A failed append is reported on `out` and the session goes on; the
    /// task flag has already been cleared at that point.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> AppResult<SessionSummary> {
        let mut summary = SessionSummary::default();

        for line in input.lines() {
            let line = line?;
            match self.classify(&line) {
                Line::Blank => {}
                Line::Quit => break,
                Line::ToggleTask => {
                    let on = self.toggle.toggle();
                    writeln!(out, "Next entry is a task: {}", on_off(on))?;
                }
                Line::Status => {
                    writeln!(out, "Next entry is a task: {}", on_off(self.toggle.is_set()))?;
                }
                Line::Unknown(cmd) => {
                    writeln!(out, "Unknown command: {}{}", self.prefix, cmd)?;
                }
                Line::Entry(text) => match self.store.capture(text, &mut self.toggle) {
                    Ok(entry) => {
                        summary.captured += 1;
                        if entry.task {
                            summary.tasks += 1;
                            writeln!(out, "Added as task: {}", entry.text)?;
                        } else {
                            writeln!(out, "Added: {}", entry.text)?;
                        }
                    }
                    Err(e) => {
                        summary.failed += 1;
                        error!("capture failed: {e}");
                        writeln!(out, "Not saved: {e}")?;
                    }
                },
            }
        }

        out.flush()?;
        Ok(summary)
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

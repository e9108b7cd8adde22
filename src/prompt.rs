//! Operator dialogue.
//!
//! The migration talks to the operator only through [`Console`], so the
//! pipeline runs the same against a terminal or against in-memory buffers.

use std::io::{self, BufRead, Stdout, StdinLock, Write};

use crate::error::MigrateError;
use crate::settings::OnUnclear;

pub trait Console {
    /// Show text to the operator.
    fn show(&mut self, text: &str) -> Result<(), MigrateError>;

    /// Wait for one line of input. `None` once input is closed.
    fn ask(&mut self) -> Result<Option<String>, MigrateError>;
}

/// A [`Console`] over any line reader and writer.
pub struct StdConsole<R, W> {
    input: R,
    output: W,
}

impl StdConsole<StdinLock<'static>, Stdout> {
    /// The process's stdin and stdout.
    pub fn terminal() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn show(&mut self, text: &str) -> Result<(), MigrateError> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(MigrateError::Console)
    }

    fn ask(&mut self) -> Result<Option<String>, MigrateError> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(MigrateError::Console)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// How a confirmation answer is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Unclear,
}

impl Answer {
    /// Any `y` anywhere means yes; otherwise any `n` means no. Case-insensitive.
    pub fn classify(response: &str) -> Self {
        let response = response.to_lowercase();
        if response.contains('y') {
            Answer::Yes
        } else if response.contains('n') {
            Answer::No
        } else {
            Answer::Unclear
        }
    }
}

/// Ask "is this ok? y/n" until the answer is usable.
///
/// With [`OnUnclear::Abort`] an unclear answer is returned as is. Closed input
/// always ends the dialogue as [`Answer::Unclear`].
pub fn confirm(console: &mut dyn Console, on_unclear: OnUnclear) -> Result<Answer, MigrateError> {
    loop {
        console.show("\nis this ok? y/n\n")?;
        let Some(line) = console.ask()? else {
            return Ok(Answer::Unclear);
        };
        match Answer::classify(&line) {
            Answer::Unclear if on_unclear == OnUnclear::Reprompt => {
                console.show("please answer y or n\n")?;
            }
            answer => return Ok(answer),
        }
    }
}

/// Show `text` and wait for the operator to press enter. Closed input is fine.
pub fn pause(console: &mut dyn Console, text: &str) -> Result<(), MigrateError> {
    console.show(text)?;
    console.ask()?;
    Ok(())
}

//! Operator prompt.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use crate::error::{LaunchrError, Result};

pub const REBUILD_QUESTION: &str = "Do you want to rebuild the apps before running? (y/n): ";

/// Asks the operator a yes/no question.
pub trait Prompter {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Writes the question and reads one line of answer.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl LinePrompter<BufReader<Stdin>, Stdout> {
    /// Prompter on the process's stdin/stdout
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.writer, "{}", question).map_err(|e| LaunchrError::Prompt(e.to_string()))?;
        self.writer.flush().map_err(|e| LaunchrError::Prompt(e.to_string()))?;

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .map_err(|e| LaunchrError::Prompt(e.to_string()))?;

        Ok(is_affirmative(&line))
    }
}

/// `y` or `Y`, ignoring surrounding whitespace
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

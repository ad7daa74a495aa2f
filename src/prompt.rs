//! Operator prompts.
//!
//! Answers come from an `OperatorInput` so that the pipeline can be driven
//! from stdin, from command-line flags, or from a script in tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

/// Source of operator answers.
pub trait OperatorInput {
    /// Show `question` and return the raw answer without its line ending.
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Interactive prompts on stdin/stdout.
#[derive(Debug, Default)]
pub struct StdinInput;

impl OperatorInput for StdinInput {
    fn ask(&mut self, question: &str) -> Result<String> {
        print!("{}", question);
        io::stdout().flush().context("Failed to flush prompt")?;

        let mut answer = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("Failed to read operator input")?;
        if read == 0 {
            bail!("Input closed before answering: {}", question.trim_end());
        }

        Ok(answer.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Pre-recorded answers, consumed in order.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl OperatorInput for ScriptedInput {
    fn ask(&mut self, question: &str) -> Result<String> {
        match self.answers.pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("No scripted answer for: {}", question.trim_end()),
        }
    }
}

/// Strip surrounding whitespace, then surrounding single and double quotes.
///
/// Paths dragged into a terminal often arrive quoted.
pub fn clean_output_dir(raw: &str) -> String {
    raw.trim().trim_matches(|c| c == '\'' || c == '"').to_string()
}

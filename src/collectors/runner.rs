//! External command execution.
//!
//! The runner captures a command's stdout into a destination and sends
//! anything unexpected (empty stdout, any stderr) to the session log's error
//! channel. It never branches on the exit code.

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use log::debug;

use crate::constants::MSG_NO_OUTPUT;
use crate::models::CommandOutput;
use crate::session_log::SessionLog;

/// Spawns a process and waits for it to finish.
pub trait CommandExecutor {
    fn execute(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

/// Executor backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn execute(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("Failed to execute {}", program))?;

        Ok(CommandOutput::from_raw(
            output.status.code(),
            &output.stdout,
            &output.stderr,
        ))
    }
}

/// Where a command's stdout goes.
#[derive(Debug, Clone, Copy)]
pub enum Destination<'a> {
    /// Written verbatim to this file
    File(&'a Path),
    /// Appended to the session log's error channel
    SessionLog,
}

/// Runs commands and routes their output.
pub struct CommandRunner<'a> {
    executor: &'a dyn CommandExecutor,
    log: &'a SessionLog,
}

impl<'a> CommandRunner<'a> {
    pub fn new(executor: &'a dyn CommandExecutor, log: &'a SessionLog) -> Self {
        Self { executor, log }
    }

    /// Run `argv` (program first) and route its output.
    ///
    /// Empty stdout leaves no output file behind and records
    /// "No output from subprocess command." instead.
    pub fn run(&self, argv: &[String], destination: Destination<'_>) -> Result<CommandOutput> {
        let (program, args) = argv
            .split_first()
            .context("Cannot run an empty command line")?;

        debug!("Running: {}", argv.join(" "));
        let output = self.executor.execute(program, args)?;
        debug!("{} exited with status {:?}", program, output.status);

        if output.stdout.is_empty() {
            self.log.error(MSG_NO_OUTPUT)?;
        } else {
            match destination {
                Destination::File(path) => {
                    fs::write(path, &output.stdout)
                        .with_context(|| format!("Failed to write output to {}", path.display()))?;
                }
                Destination::SessionLog => {
                    self.log.error(output.stdout.trim_end())?;
                }
            }
        }

        if !output.stderr.is_empty() {
            self.log.error(output.stderr.trim_end())?;
        }

        Ok(output)
    }
}

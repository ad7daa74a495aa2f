//! Test utilities for android-log-collector
//!
//! Stand-ins for adb so that collection logic runs without a device.

#![cfg(test)]

use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::{bail, Result};

use crate::collectors::runner::CommandExecutor;
use crate::models::CommandOutput;

/// Executor that replays canned outputs in order and records every call.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    outputs: RefCell<VecDeque<CommandOutput>>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedExecutor {
    pub fn new(outputs: Vec<CommandOutput>) -> Self {
        Self {
            outputs: RefCell::new(outputs.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Every argv seen so far, program first.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn execute(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let mut argv = vec![program.to_string()];
        argv.extend(args.iter().cloned());
        self.calls.borrow_mut().push(argv);

        match self.outputs.borrow_mut().pop_front() {
            Some(output) => Ok(output),
            None => bail!("No scripted output left for {}", program),
        }
    }
}

/// Successful command with the given stdout and no stderr.
pub fn ok_output(stdout: &str) -> CommandOutput {
    CommandOutput {
        status: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

/// `adb devices` listing with every id in the `device` state.
pub fn devices_output(ids: &[&str]) -> String {
    let mut output = String::from("List of devices attached\n");
    for id in ids {
        output.push_str(id);
        output.push_str("\tdevice\n");
    }
    output.push('\n');
    output
}

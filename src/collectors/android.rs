//! adb command lines and the two device captures.

use std::path::Path;

use anyhow::Result;
use log::info;

use crate::collectors::runner::{CommandRunner, Destination};
use crate::constants::{ADB_DEVICES_ARGS, DEFAULT_ADB_PATH};
use crate::models::{CaptureKind, CommandOutput};
use crate::session_log::SessionLog;

/// Builds argument vectors for the debugging bridge.
#[derive(Debug, Clone, PartialEq)]
pub struct Adb {
    program: String,
}

impl Default for Adb {
    fn default() -> Self {
        Self::new(DEFAULT_ADB_PATH)
    }
}

impl Adb {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// `adb devices`
    pub fn devices_argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(ADB_DEVICES_ARGS.iter().map(|s| s.to_string()))
            .collect()
    }

    /// `adb -s <device> <capture args...>`
    pub fn capture_argv(&self, device: &str, kind: CaptureKind) -> Vec<String> {
        [self.program.as_str(), "-s", device]
            .into_iter()
            .chain(kind.adb_args().iter().copied())
            .map(str::to_string)
            .collect()
    }
}

/// Run one capture against `device`, writing stdout to `dest`.
///
/// A failed capture is not detected here; it only shows up in the
/// session log through the runner.
pub fn capture(
    runner: &CommandRunner<'_>,
    adb: &Adb,
    log: &SessionLog,
    device: &str,
    kind: CaptureKind,
    dest: &Path,
) -> Result<CommandOutput> {
    log.info(&format!("Capturing {} logs...", kind.label()))?;

    let output = runner.run(&adb.capture_argv(device, kind), Destination::File(dest))?;
    info!("{} capture finished with {} bytes of output", kind.label(), output.stdout.len());

    log.info(&format!("{} logs saved: {}", kind.display_name(), dest.display()))?;
    Ok(output)
}

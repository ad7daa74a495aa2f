//! # android-log-collector
//!
//! Forensic collection of Android device logs over adb, packaged and hashed
//! for chain of custody.
//!
//! ## Overview
//!
//! One run walks a fixed sequence against one attached device:
//!
//! 1. List devices with `adb devices` and let the operator pick one
//! 2. Dump every logcat buffer (`logcat -b all -v UTC,usec -d`)
//! 3. Dump every system service (`shell dumpsys`)
//! 4. ZIP both captures
//! 5. Write the archive's MD5 to a sidecar file
//!
//! Every step is recorded in an append-only session log next to the
//! artifacts.
//!
//! ## Output Files
//!
//! ```text
//! <output>/log_case_<case>.log
//! <output>/logcat_case_<case>_device_<device>.txt
//! <output>/dumpsys_case_<case>_device_<device>.txt
//! <output>/Android_Logs_Case_<case>_Device_<device>.zip
//! <output>/Android_Logs_Case_<case>.md5
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use android_log_collector::collectors::runner::SystemExecutor;
//! use android_log_collector::pipeline::{Pipeline, RunOptions};
//! use android_log_collector::prompt::StdinInput;
//! use android_log_collector::signal::Interrupt;
//!
//! # fn main() -> anyhow::Result<()> {
//! let interrupt = Interrupt::install()?;
//! let mut input = StdinInput;
//! let mut pipeline = Pipeline::new(&SystemExecutor, &mut input, &interrupt);
//!
//! let report = pipeline.run(&RunOptions::default())?;
//! println!("Archive MD5: {}", report.md5);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Core data models: case, artifact paths, command output
pub mod models;

/// adb invocation, device selection and captures
pub mod collectors;

/// Archive packaging and hashing
pub mod utils;

/// Forward-only collection run
pub mod pipeline;

/// Operator prompts
pub mod prompt;

/// Append-only session log
pub mod session_log;

/// Ctrl+C handling and the idle wait
pub mod signal;

/// Fixed values used across the crate
pub mod constants;

#[cfg(test)]
pub mod test_utils;

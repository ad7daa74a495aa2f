//! Global constants for the android-log-collector application.
//!
//! This module centralizes all hardcoded values: adb arguments, artifact
//! file name patterns and the messages written to the session log.

// Hashing
/// Chunk size used when streaming the archive through the digests (4KB)
pub const HASH_CHUNK_SIZE: usize = 4096;

// Timestamps
/// Session log timestamp format (local time, second resolution)
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// adb invocation
/// Default debugging bridge executable, resolved through PATH
pub const DEFAULT_ADB_PATH: &str = "adb";

/// Arguments listing attached devices
pub const ADB_DEVICES_ARGS: &[&str] = &["devices"];

/// Logcat arguments: every buffer, UTC timestamps with microseconds, dump and exit
pub const LOGCAT_ARGS: &[&str] = &["logcat", "-b", "all", "-v", "UTC,usec", "-d"];

/// Dumpsys arguments: every service, single dump
pub const DUMPSYS_ARGS: &[&str] = &["shell", "dumpsys"];

/// Marker a device line must contain to be selectable
pub const DEVICE_STATE_MARKER: &str = "device";

// Artifact labels
pub const LOGCAT_LABEL: &str = "logcat";
pub const DUMPSYS_LABEL: &str = "dumpsys";

// Prompts
pub const PROMPT_CASE_NUMBER: &str = "Enter Case Number: ";
pub const PROMPT_OUTPUT_DIR: &str = "Enter Output Directory (e.g., C:\\Forensics\\Logs): ";
pub const PROMPT_DEVICE_INDEX: &str = "Enter the number corresponding to the device: ";

// Session log messages
pub const MSG_NO_OUTPUT: &str = "No output from subprocess command.";
pub const MSG_NO_DEVICES: &str = "No Android devices detected!";
pub const MSG_INVALID_SELECTION: &str = "Invalid selection. Exiting.";
pub const MSG_INTERRUPTED: &str = "Process interrupted. Exiting...";
pub const MSG_COMPLETED: &str = "Process completed successfully!";
pub const MSG_WAIT_FOR_EXIT: &str = "Hit Ctrl + C to exit.";

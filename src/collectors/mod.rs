//! Device-side collection.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │     device: detect + operator choice    │
//! ├─────────────────────────────────────────┤
//! │     android: logcat and dumpsys         │
//! ├─────────────────────────────────────────┤
//! │     runner: process spawn + routing     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Everything goes through [`runner::CommandRunner`], so tests can swap
//! adb for a scripted [`runner::CommandExecutor`].

/// adb command lines and the two device captures
pub mod android;

/// Attached device detection and selection
pub mod device;

/// External command execution and output routing
pub mod runner;

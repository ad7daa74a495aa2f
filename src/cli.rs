use clap::Parser;

use crate::constants::DEFAULT_ADB_PATH;

/// Command-line arguments for the android-log-collector tool.
///
/// Every option is optional; anything not given is prompted for.
#[derive(Parser, Debug)]
#[clap(name = "android-log-collector", about = "Forensic Android logcat/dumpsys collector")]
pub struct Args {
    /// Case number used in every output file name
    #[clap(long)]
    pub case: Option<String>,

    /// Output directory for the session log, captures, archive and digest
    #[clap(short, long)]
    pub output: Option<String>,

    /// Serial of the device to collect from (must be listed by `adb devices`)
    #[clap(short, long)]
    pub device: Option<String>,

    /// Path to the adb executable
    #[clap(long, default_value = DEFAULT_ADB_PATH)]
    pub adb: String,

    /// Exit after hashing instead of waiting for Ctrl+C
    #[clap(long)]
    pub no_wait: bool,

    /// Verbose logging
    #[clap(short, long)]
    pub verbose: bool,
}

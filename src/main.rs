use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use android_log_collector::cli::Args;
use android_log_collector::collectors::android::Adb;
use android_log_collector::collectors::device::is_recorded_selection_failure;
use android_log_collector::collectors::runner::SystemExecutor;
use android_log_collector::pipeline::{Pipeline, RunOptions};
use android_log_collector::prompt::StdinInput;
use android_log_collector::signal::Interrupt;

fn main() -> Result<()> {
    // Parse arguments
    let args = Args::parse();

    // Initialize logging
    initialize_logging(args.verbose)?;

    // Ctrl+C must be caught from the first prompt onwards
    let interrupt = Interrupt::install()?;

    let options = RunOptions {
        case_number: args.case.clone(),
        output_dir: args.output.clone(),
        device: args.device.clone(),
        adb: Adb::new(args.adb.as_str()),
    };

    let mut input = StdinInput;
    let mut pipeline = Pipeline::new(&SystemExecutor, &mut input, &interrupt);
    let report = match pipeline.run(&options) {
        Ok(report) => report,
        // Already in the session log; the console stays quiet
        Err(e) if is_recorded_selection_failure(&e) => std::process::exit(1),
        Err(e) => return Err(e),
    };
    info!("Collected {} into {}", report.device, report.paths.archive.display());

    if args.no_wait {
        return Ok(());
    }

    pipeline.idle(&report)
}

/// Initialize logging with the specified verbosity level.
///
/// Operator-facing lines come from the session log echo, so diagnostics stay
/// at warnings unless `--verbose` is set.
fn initialize_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ).context("Failed to initialize logger")?;
    Ok(())
}

//! The collection run, start to finish.
//!
//! Stages only move forward:
//! `Start → DetectDevices → SelectDevice → CaptureEventLog →
//! CaptureStateDump → Package → Hash → Idle`.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::collectors::android::{capture, Adb};
use crate::collectors::device::{choose_device, detect_devices};
use crate::collectors::runner::{CommandExecutor, CommandRunner};
use crate::constants::{MSG_COMPLETED, MSG_WAIT_FOR_EXIT, PROMPT_CASE_NUMBER, PROMPT_OUTPUT_DIR};
use crate::models::{CaptureKind, CaseInfo, CollectionReport};
use crate::prompt::{clean_output_dir, OperatorInput};
use crate::signal::Interrupt;
use crate::session_log::SessionLog;
use crate::utils::{compress::package_captures, hash::write_md5_sidecar};

/// Where a run is; ordered so that stages only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Start,
    DetectDevices,
    SelectDevice,
    CaptureEventLog,
    CaptureStateDump,
    Package,
    Hash,
    Idle,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::DetectDevices => "detect-devices",
            Stage::SelectDevice => "select-device",
            Stage::CaptureEventLog => "capture-event-log",
            Stage::CaptureStateDump => "capture-state-dump",
            Stage::Package => "package",
            Stage::Hash => "hash",
            Stage::Idle => "idle",
        };
        f.write_str(name)
    }
}

/// Answers supplied up front; anything left `None` is prompted for.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub case_number: Option<String>,
    pub output_dir: Option<String>,
    pub device: Option<String>,
    pub adb: Adb,
}

/// One collection run against one device.
pub struct Pipeline<'a> {
    executor: &'a dyn CommandExecutor,
    input: &'a mut dyn OperatorInput,
    interrupt: &'a Interrupt,
    stage: Stage,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        executor: &'a dyn CommandExecutor,
        input: &'a mut dyn OperatorInput,
        interrupt: &'a Interrupt,
    ) -> Self {
        Self {
            executor,
            input,
            interrupt,
            stage: Stage::Start,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, next: Stage) {
        debug_assert!(next > self.stage, "stages only move forward");
        debug!("Stage {} -> {}", self.stage, next);
        self.stage = next;
    }

    /// Prompt for the case, collect, package and hash.
    ///
    /// Returns once the digest sidecar is written; the caller decides
    /// whether to go idle.
    pub fn run(&mut self, options: &RunOptions) -> Result<CollectionReport> {
        let case_number = match &options.case_number {
            Some(case) => case.clone(),
            None => self.input.ask(PROMPT_CASE_NUMBER)?,
        };
        let output_dir = match &options.output_dir {
            Some(dir) => clean_output_dir(dir),
            None => clean_output_dir(&self.input.ask(PROMPT_OUTPUT_DIR)?),
        };
        let case = CaseInfo::new(case_number, PathBuf::from(output_dir));

        fs::create_dir_all(&case.output_dir)
            .with_context(|| format!("Failed to create output directory {}", case.output_dir.display()))?;

        let log = SessionLog::new(case.session_log_path());
        self.interrupt.attach(&log);
        log.info("Logging started")?;
        info!("Session log at {}", log.path().display());

        let runner = CommandRunner::new(self.executor, &log);

        self.advance(Stage::DetectDevices);
        let devices = detect_devices(&runner, &options.adb, &log)?;

        self.advance(Stage::SelectDevice);
        let device = choose_device(&devices, &log, &mut *self.input, options.device.as_deref())?;
        let paths = case.artifact_paths(&device);

        self.advance(Stage::CaptureEventLog);
        capture(&runner, &options.adb, &log, &device, CaptureKind::Logcat, &paths.logcat)?;

        self.advance(Stage::CaptureStateDump);
        capture(&runner, &options.adb, &log, &device, CaptureKind::Dumpsys, &paths.dumpsys)?;

        self.advance(Stage::Package);
        log.info("Zipping collected logs...")?;
        if let Err(e) = package_captures(&paths.captures(), &paths.archive) {
            log.error(&format!("Packaging aborted: {:#}", e))?;
            return Err(e);
        }
        log.info(&format!("Logs zipped: {}", paths.archive.display()))?;

        self.advance(Stage::Hash);
        log.info("Generating MD5 hash...")?;
        let digests = write_md5_sidecar(&paths.archive, &paths.digest)?;
        log.info(&format!("MD5 Hash saved: {}", paths.digest.display()))?;
        log.error(&format!("MD5: {} SHA-256: {}", digests.md5, digests.sha256))?;

        log.info(MSG_COMPLETED)?;

        Ok(CollectionReport {
            device,
            paths,
            md5: digests.md5,
            sha256: digests.sha256,
        })
    }

    /// Stay resident until Ctrl+C, then record the final line.
    pub fn idle(&mut self, report: &CollectionReport) -> Result<()> {
        self.advance(Stage::Idle);
        let log = SessionLog::new(&report.paths.session_log);
        log.info(MSG_WAIT_FOR_EXIT)?;
        self.interrupt.wait()
    }
}

use std::path::{Path, PathBuf};

use crate::constants::{DUMPSYS_ARGS, DUMPSYS_LABEL, LOGCAT_ARGS, LOGCAT_LABEL};

/// Case number and output directory supplied by the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseInfo {
    pub case_number: String,
    pub output_dir: PathBuf,
}

impl CaseInfo {
    pub fn new(case_number: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            case_number: case_number.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Path of the session log: `log_case_<case>.log`
    pub fn session_log_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("log_case_{}.log", self.case_number))
    }

    /// All artifact paths for a run against `device`.
    pub fn artifact_paths(&self, device: &str) -> ArtifactPaths {
        ArtifactPaths {
            session_log: self.session_log_path(),
            logcat: self.capture_path(CaptureKind::Logcat, device),
            dumpsys: self.capture_path(CaptureKind::Dumpsys, device),
            archive: self.output_dir.join(format!(
                "Android_Logs_Case_{}_Device_{}.zip",
                self.case_number, device
            )),
            // The sidecar name carries no device id, matching existing case records.
            digest: self
                .output_dir
                .join(format!("Android_Logs_Case_{}.md5", self.case_number)),
        }
    }

    /// Path of a capture file: `<label>_case_<case>_device_<device>.txt`
    pub fn capture_path(&self, kind: CaptureKind, device: &str) -> PathBuf {
        self.output_dir.join(format!(
            "{}_case_{}_device_{}.txt",
            kind.label(),
            self.case_number,
            device
        ))
    }
}

/// The five files a complete run leaves in the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    pub session_log: PathBuf,
    pub logcat: PathBuf,
    pub dumpsys: PathBuf,
    pub archive: PathBuf,
    pub digest: PathBuf,
}

impl ArtifactPaths {
    pub fn captures(&self) -> [&Path; 2] {
        [&self.logcat, &self.dumpsys]
    }
}

/// The two fixed device captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    /// Full-buffer logcat dump
    Logcat,
    /// Full system-service state dump
    Dumpsys,
}

impl CaptureKind {
    pub fn label(self) -> &'static str {
        match self {
            CaptureKind::Logcat => LOGCAT_LABEL,
            CaptureKind::Dumpsys => DUMPSYS_LABEL,
        }
    }

    /// adb arguments following `-s <device>`
    pub fn adb_args(self) -> &'static [&'static str] {
        match self {
            CaptureKind::Logcat => LOGCAT_ARGS,
            CaptureKind::Dumpsys => DUMPSYS_ARGS,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CaptureKind::Logcat => "Logcat",
            CaptureKind::Dumpsys => "Dumpsys",
        }
    }
}

/// Decoded output of one external command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Build from raw process output, replacing invalid UTF-8 sequences.
    pub fn from_raw(status: Option<i32>, stdout: &[u8], stderr: &[u8]) -> Self {
        Self {
            status,
            stdout: String::from_utf8_lossy(stdout).into_owned(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        }
    }
}

/// What a finished collection produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionReport {
    pub device: String,
    pub paths: ArtifactPaths,
    pub md5: String,
    pub sha256: String,
}

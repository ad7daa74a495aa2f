//! Attached device detection and operator selection.

use anyhow::Result;
use log::debug;
use thiserror::Error;

use crate::collectors::android::Adb;
use crate::collectors::runner::{CommandRunner, Destination};
use crate::constants::{DEVICE_STATE_MARKER, MSG_INVALID_SELECTION, MSG_NO_DEVICES, PROMPT_DEVICE_INDEX};
use crate::prompt::OperatorInput;
use crate::session_log::SessionLog;

/// Conditions that end a run before any capture starts.
///
/// Both are recorded on the session log's error channel before they are
/// returned, so the binary exits without printing them again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// `adb devices` listed nothing usable
    #[error("{msg}", msg = MSG_NO_DEVICES)]
    NoDevices,
    /// The operator's answer did not name a listed device
    #[error("{msg} (input: {0:?})", msg = MSG_INVALID_SELECTION)]
    InvalidSelection(String),
}

/// Whether `err` is a selection failure already recorded in the session log.
pub fn is_recorded_selection_failure(err: &anyhow::Error) -> bool {
    err.downcast_ref::<SelectionError>().is_some()
}

/// Extract selectable device identifiers from `adb devices` output.
///
/// The first line is the header. A line qualifies when it contains the
/// literal `device`; the identifier is its first tab or whitespace
/// delimited field.
pub fn parse_device_list(output: &str) -> Vec<String> {
    output
        .trim()
        .lines()
        .skip(1)
        .filter(|line| line.contains(DEVICE_STATE_MARKER))
        .filter_map(|line| {
            let id = match line.split_once('\t') {
                Some((id, _)) => id.trim(),
                None => line.split_whitespace().next().unwrap_or(""),
            };
            (!id.is_empty()).then(|| id.to_string())
        })
        .collect()
}

/// Resolve a 1-based answer against the device list.
pub fn select_device<'d>(devices: &'d [String], answer: &str) -> Result<&'d str, SelectionError> {
    let invalid = || SelectionError::InvalidSelection(answer.to_string());

    let index: usize = answer.trim().parse().map_err(|_| invalid())?;
    if index == 0 || index > devices.len() {
        return Err(invalid());
    }

    Ok(&devices[index - 1])
}

/// List attached devices through adb, appending the raw listing to the log.
pub fn detect_devices(runner: &CommandRunner<'_>, adb: &Adb, log: &SessionLog) -> Result<Vec<String>> {
    log.info("Checking for connected Android devices...")?;

    let output = runner.run(&adb.devices_argv(), Destination::SessionLog)?;
    let devices = parse_device_list(&output.stdout);
    debug!("Detected {} selectable device(s)", devices.len());

    if devices.is_empty() {
        log.error(MSG_NO_DEVICES)?;
        return Err(SelectionError::NoDevices.into());
    }

    Ok(devices)
}

/// Show the numbered device list and resolve the operator's choice.
///
/// A `preset` serial skips the prompt but must still be in the list.
pub fn choose_device(
    devices: &[String],
    log: &SessionLog,
    input: &mut dyn OperatorInput,
    preset: Option<&str>,
) -> Result<String> {
    log.info("Connected Devices:")?;
    for (index, device) in devices.iter().enumerate() {
        log.info(&format!("{}) {}", index + 1, device))?;
    }

    let selected = match preset {
        Some(serial) if devices.iter().any(|d| d == serial) => Ok(serial),
        Some(serial) => Err(SelectionError::InvalidSelection(serial.to_string())),
        None => {
            let answer = input.ask(PROMPT_DEVICE_INDEX)?;
            select_device(devices, &answer)
        }
    };

    match selected {
        Ok(device) => {
            log.info(&format!("Selected Device: {}", device))?;
            Ok(device.to_string())
        }
        Err(e) => {
            log.error(MSG_INVALID_SELECTION)?;
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedInput;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn three_devices() -> Vec<String> {
        vec!["abc123".into(), "def456".into(), "emulator-5554".into()]
    }

    #[test]
    fn test_parse_filters_offline() {
        let output = "List of devices attached\nabc123\tdevice\ndef456\toffline\n";
        assert_eq!(parse_device_list(output), vec!["abc123".to_string()]);
    }

    #[test]
    fn test_parse_header_only() {
        assert!(parse_device_list("List of devices attached\n\n").is_empty());
        assert!(parse_device_list("").is_empty());
    }

    #[test]
    fn test_parse_long_format() {
        let output = "List of devices attached\n\
                      emulator-5554          device product:sdk_gphone64 model:sdk transport_id:1\n\
                      R58M123ABC             unauthorized usb:1-1 transport_id:2\n";
        assert_eq!(parse_device_list(output), vec!["emulator-5554".to_string()]);
    }

    #[test]
    fn test_parse_crlf_line_endings() {
        let output = "List of devices attached\r\nabc123\tdevice\r\nxyz\tdevice\r\n";
        assert_eq!(parse_device_list(output), vec!["abc123".to_string(), "xyz".to_string()]);
    }

    #[test]
    fn test_select_boundaries() {
        let devices = three_devices();
        assert_eq!(
            select_device(&devices, "0"),
            Err(SelectionError::InvalidSelection("0".into()))
        );
        assert_eq!(
            select_device(&devices, "4"),
            Err(SelectionError::InvalidSelection("4".into()))
        );
        assert_eq!(select_device(&devices, "1"), Ok("abc123"));
        assert_eq!(select_device(&devices, "2"), Ok("def456"));
        assert_eq!(select_device(&devices, "3"), Ok("emulator-5554"));
    }

    #[test]
    fn test_select_non_numeric() {
        let devices = three_devices();
        assert!(select_device(&devices, "two").is_err());
        assert!(select_device(&devices, "").is_err());
        assert!(select_device(&devices, "-1").is_err());
        assert_eq!(select_device(&devices, " 2 "), Ok("def456"));
    }

    #[test]
    fn test_choose_device_logs_listing() {
        let temp_dir = TempDir::new().unwrap();
        let log = SessionLog::new(temp_dir.path().join("session.log"));
        let mut input = ScriptedInput::new(["2"]);

        let device = choose_device(&three_devices(), &log, &mut input, None).unwrap();
        assert_eq!(device, "def456");

        let content = fs::read_to_string(log.path()).unwrap();
        assert!(content.contains(" - Connected Devices:"));
        assert!(content.contains(" - 1) abc123"));
        assert!(content.contains(" - 3) emulator-5554"));
        assert!(content.contains(" - Selected Device: def456"));
    }

    #[test]
    fn test_choose_device_invalid_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let log = SessionLog::new(temp_dir.path().join("session.log"));
        let mut input = ScriptedInput::new(["9"]);

        let err = choose_device(&three_devices(), &log, &mut input, None).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SelectionError>(),
            Some(&SelectionError::InvalidSelection("9".into()))
        );
        let content = fs::read_to_string(log.path()).unwrap();
        assert!(content.contains(" - Invalid selection. Exiting."));
    }

    #[test]
    fn test_selection_error_messages() {
        assert_eq!(SelectionError::NoDevices.to_string(), "No Android devices detected!");
        assert_eq!(
            SelectionError::InvalidSelection("abc".into()).to_string(),
            "Invalid selection. Exiting. (input: \"abc\")"
        );
    }

    #[test]
    fn test_choose_device_preset() {
        let temp_dir = TempDir::new().unwrap();
        let log = SessionLog::new(temp_dir.path().join("session.log"));
        let mut input = ScriptedInput::default();

        let device = choose_device(&three_devices(), &log, &mut input, Some("emulator-5554")).unwrap();
        assert_eq!(device, "emulator-5554");

        let err = choose_device(&three_devices(), &log, &mut input, Some("missing")).unwrap_err();
        assert!(err.downcast_ref::<SelectionError>().is_some());
    }

    proptest! {
        #[test]
        fn prop_only_in_range_indices_select(count in 1usize..10, index in 0usize..20) {
            let devices: Vec<String> = (0..count).map(|i| format!("dev{}", i)).collect();
            let result = select_device(&devices, &index.to_string());
            if index >= 1 && index <= count {
                prop_assert_eq!(result, Ok(devices[index - 1].as_str()));
            } else {
                prop_assert!(result.is_err());
            }
        }

        #[test]
        fn prop_parsed_ids_never_contain_whitespace(ids in proptest::collection::vec("[a-zA-Z0-9-]{1,16}", 0..6)) {
            let mut output = String::from("List of devices attached\n");
            for id in &ids {
                output.push_str(&format!("{}\tdevice\n", id));
            }
            prop_assert_eq!(parse_device_list(&output), ids);
        }
    }
}

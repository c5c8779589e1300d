use crate::cli::RunArgs;
use crate::detect_params;
use crate::exit_codes;
use crate::output;
use artifact_rs::{write_interval_file, ArtifactError, WriteOutcome};
use std::path::Path;

/// Errors caused by the input rather than by detection itself
pub fn exit_code_for(error: &ArtifactError) -> i32 {
    match error {
        ArtifactError::UnsupportedLayout(_)
        | ArtifactError::FileNotFound(_)
        | ArtifactError::ParseError(_)
        | ArtifactError::ShapeMismatch(_)
        | ArtifactError::InvalidParameter(_) => exit_codes::INPUT_ERROR,
        _ => exit_codes::EXECUTION_ERROR,
    }
}

pub fn execute(args: RunArgs) -> i32 {
    if let Err(msg) = detect_params::validate_file(&args.file) {
        eprintln!("Error: {}", msg);
        return exit_codes::INPUT_ERROR;
    }

    let (runner, detector) = match detect_params::build_runner(&args.detection) {
        Ok(r) => r,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    if !args.quiet {
        eprintln!("Running {} detection on {}...", detector, args.file);
        eprintln!(
            "  Sampling rate: {} Hz, EEG channels: {}",
            args.detection.sr, args.detection.eeg_channels
        );
    }

    let report = match runner.run_file(
        Path::new(&args.file),
        args.detection.sr,
        args.detection.duration,
        args.detection.eeg_channels,
        detector,
    ) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_code_for(&e);
        }
    };

    if !args.quiet {
        eprintln!(
            "  Flagged {}/{} blocks ({} samples each)",
            report.flagged_count(),
            report.block_count,
            report.block_samples
        );
        for failure in &report.channel_failures {
            eprintln!("  Channel {} skipped: {}", failure.channel, failure.error);
        }
    }

    match write_interval_file(Path::new(&args.output), &report.intervals) {
        Ok(WriteOutcome::Written(path)) => {
            if !args.quiet {
                eprintln!("Intervals written to {}", path.display());
            }
        }
        Ok(WriteOutcome::AlreadyExists(path)) => {
            eprintln!("File already exists: {}", path.display());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    }

    if let Some(ref report_path) = args.report {
        let json = match output::to_json(&report, args.compact) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
        };
        if let Err(e) = output::write_output(&json, Some(report_path.as_str())) {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    }

    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{DetectionArgs, RunArgs};
    use std::io::Write;

    fn write_recording(dir: &Path) -> String {
        let path = dir.join("rec.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        for i in 0..32 {
            let v = if i % 2 == 0 { -5 } else { 7 };
            let row: Vec<String> = (0..20).map(|_| v.to_string()).collect();
            writeln!(file, "{}", row.join(" ")).unwrap();
        }
        path.to_str().unwrap().to_string()
    }

    fn make_args(file: String, output: String) -> RunArgs {
        RunArgs {
            file,
            detection: DetectionArgs {
                sr: 4,
                eeg_channels: 19,
                duration: None,
                detector: "EEP".to_string(),
                config: None,
                lambda: None,
                mains: None,
            },
            output,
            report: None,
            compact: false,
            quiet: true,
        }
    }

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(
            exit_code_for(&ArtifactError::UnsupportedLayout(7)),
            exit_codes::INPUT_ERROR
        );
        assert_eq!(
            exit_code_for(&ArtifactError::InsufficientData {
                found: 1,
                required: 2
            }),
            exit_codes::EXECUTION_ERROR
        );
    }

    #[test]
    fn test_execute_writes_table() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_recording(dir.path());
        let output = dir.path().join("result.txt");
        let code = execute(make_args(file, output.to_str().unwrap().to_string()));
        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "Start\tEnd\n");
    }

    #[test]
    fn test_execute_keeps_existing_table() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_recording(dir.path());
        let output = dir.path().join("result.txt");
        std::fs::write(&output, "old").unwrap();
        let code = execute(make_args(file, output.to_str().unwrap().to_string()));
        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "old");
    }

    #[test]
    fn test_execute_missing_file() {
        let code = execute(make_args(
            "/nonexistent/rec.txt".to_string(),
            "result.txt".to_string(),
        ));
        assert_eq!(code, exit_codes::INPUT_ERROR);
    }
}

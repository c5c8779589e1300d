use crate::cli::BatchArgs;
use crate::detect_params;
use crate::exit_codes;
use artifact_rs::{write_interval_file, ArtifactRunner, DetectorKind, WriteOutcome};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub fn execute(args: BatchArgs) -> i32 {
    let files = match resolve_files(&args) {
        Ok(f) => f,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    if files.is_empty() {
        eprintln!("Error: No matching files found");
        return exit_codes::INPUT_ERROR;
    }

    if args.dry_run {
        for f in &files {
            println!("{}", f);
        }
        if !args.quiet {
            eprintln!("Found {} file(s)", files.len());
        }
        return exit_codes::SUCCESS;
    }

    let (runner, detector) = match detect_params::build_runner(&args.detection) {
        Ok(r) => r,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    if let Err(e) = std::fs::create_dir_all(&args.output_dir) {
        eprintln!(
            "Error: Failed to create output directory '{}': {}",
            args.output_dir, e
        );
        return exit_codes::EXECUTION_ERROR;
    }

    let total = files.len();
    let mut succeeded = 0usize;
    let mut failed = 0usize;
    let start_time = Instant::now();

    for (i, file_path) in files.iter().enumerate() {
        if !args.quiet {
            eprintln!("[{}/{}] {}...", i + 1, total, file_path);
        }

        match process_file(&runner, detector, file_path, &args) {
            Ok(flagged) => {
                if !args.quiet {
                    eprintln!("  {} block(s) flagged", flagged);
                }
                succeeded += 1;
            }
            Err(msg) => {
                eprintln!("  Error: {}", msg);
                failed += 1;
                if !args.continue_on_error {
                    break;
                }
            }
        }
    }

    let elapsed = start_time.elapsed();

    if !args.quiet {
        eprintln!(
            "Batch complete: {}/{} succeeded, {}/{} failed, {:.1}s",
            succeeded,
            total,
            failed,
            total,
            elapsed.as_secs_f64()
        );
    }

    if failed == 0 {
        exit_codes::SUCCESS
    } else if succeeded > 0 {
        exit_codes::PARTIAL_FAILURE
    } else {
        exit_codes::EXECUTION_ERROR
    }
}

/// Detect one file and write its interval table, returning the flagged block count
fn process_file(
    runner: &ArtifactRunner,
    detector: DetectorKind,
    file_path: &str,
    args: &BatchArgs,
) -> Result<usize, String> {
    detect_params::validate_file(file_path)?;

    let report = runner
        .run_file(
            Path::new(file_path),
            args.detection.sr,
            args.detection.duration,
            args.detection.eeg_channels,
            detector,
        )
        .map_err(|e| format!("Detection failed: {}", e))?;

    let out_path = output_path(&args.output_dir, file_path, detector);
    match write_interval_file(&out_path, &report.intervals).map_err(|e| e.to_string())? {
        WriteOutcome::Written(_) => {}
        WriteOutcome::AlreadyExists(path) => {
            eprintln!("  File already exists: {}", path.display());
        }
    }

    Ok(report.flagged_count())
}

/// `<output_dir>/<stem>_<detector>.txt`
fn output_path(output_dir: &str, file_path: &str, detector: DetectorKind) -> PathBuf {
    let stem = Path::new(file_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("recording");
    Path::new(output_dir).join(format!("{}_{}.txt", stem, detector))
}

fn resolve_files(args: &BatchArgs) -> Result<Vec<String>, String> {
    if let Some(ref pattern) = args.glob {
        resolve_glob(pattern)
    } else if let Some(ref files) = args.files {
        Ok(files.clone())
    } else {
        Err("One of --glob or --files must be specified".to_string())
    }
}

fn resolve_glob(pattern: &str) -> Result<Vec<String>, String> {
    let paths = glob::glob(pattern)
        .map_err(|e| format!("Invalid glob pattern '{}': {}", pattern, e))?;

    let mut files: Vec<String> = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    if let Some(s) = path.to_str() {
                        files.push(s.to_string());
                    }
                }
            }
            Err(e) => {
                log::warn!("glob error: {}", e);
            }
        }
    }
    files.sort();
    Ok(files)
}

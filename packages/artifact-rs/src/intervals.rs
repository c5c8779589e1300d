use crate::error::{ArtifactError, Result};
use crate::types::ArtifactInterval;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Header line of the interval table
pub const TABLE_HEADER: &str = "Start\tEnd";

/// Default interval file name
pub const DEFAULT_OUTPUT_FILE: &str = "result.txt";

/// Result of writing an interval file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// The target already existed and was left untouched
    AlreadyExists(PathBuf),
}

/// One `[i * block_samples, (i + 1) * block_samples)` interval per flagged block
///
/// Flagged neighbours yield abutting intervals; nothing is merged.
pub fn extract_intervals(flags: &[bool], block_samples: usize) -> Vec<ArtifactInterval> {
    let step = block_samples as u64;
    flags
        .iter()
        .enumerate()
        .filter(|&(_, &flagged)| flagged)
        .map(|(i, _)| {
            let start = i as u64 * step;
            ArtifactInterval {
                start,
                end: start + step,
            }
        })
        .collect()
}

/// Render intervals as a tab-separated `Start`/`End` table
pub fn format_interval_table(intervals: &[ArtifactInterval]) -> String {
    let mut table = String::with_capacity(16 * (intervals.len() + 1));
    table.push_str(TABLE_HEADER);
    table.push('\n');
    for interval in intervals {
        table.push_str(&format!("{}\t{}\n", interval.start, interval.end));
    }
    table
}

/// Parse a table produced by [`format_interval_table`]
pub fn parse_interval_table(content: &str) -> Result<Vec<ArtifactInterval>> {
    let mut lines = content.lines();

    match lines.next() {
        Some(header) if header.trim_end() == TABLE_HEADER => {}
        Some(header) => {
            return Err(ArtifactError::ParseError(format!(
                "Expected header '{}', found '{}'",
                TABLE_HEADER.escape_default(),
                header
            )))
        }
        None => return Err(ArtifactError::ParseError("Empty interval table".to_string())),
    }

    lines
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 2 {
                return Err(ArtifactError::ParseError(format!(
                    "Row {}: expected 2 columns, found {}",
                    idx + 1,
                    fields.len()
                )));
            }
            let parse = |field: &str| {
                field.trim().parse::<u64>().map_err(|_| {
                    ArtifactError::ParseError(format!(
                        "Row {}: '{}' is not a sample index",
                        idx + 1,
                        field
                    ))
                })
            };
            Ok(ArtifactInterval {
                start: parse(fields[0])?,
                end: parse(fields[1])?,
            })
        })
        .collect()
}

/// Write the interval table unless `path` already exists
///
/// An existing file is never overwritten or appended to; that case is
/// reported as [`WriteOutcome::AlreadyExists`], not as an error.
pub fn write_interval_file(path: &Path, intervals: &[ArtifactInterval]) -> Result<WriteOutcome> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            log::info!("File already exists, not writing: {}", path.display());
            return Ok(WriteOutcome::AlreadyExists(path.to_path_buf()));
        }
        Err(e) => return Err(ArtifactError::IoError(e)),
    };

    file.write_all(format_interval_table(intervals).as_bytes())?;
    log::info!(
        "Wrote {} interval(s) to {}",
        intervals.len(),
        path.display()
    );
    Ok(WriteOutcome::Written(path.to_path_buf()))
}

pub fn read_interval_file(path: &Path) -> Result<Vec<ArtifactInterval>> {
    if !path.exists() {
        return Err(ArtifactError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_interval_table(&content)
}

use crate::error::{ArtifactError, Result};
use crate::mmap_utils::mmap_file;
use crate::types::Recording;
use nalgebra::DMatrix;
use serde::Serialize;
use std::path::Path;

/// Numeric matrix formats accepted by the recording loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileType {
    /// Whitespace-separated ASCII export
    Ascii,
    /// Comma or semicolon separated values
    Csv,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "asc" | "ascii" | "txt" | "dat" => Some(Self::Ascii),
            "csv" | "tsv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Parsed numeric matrix in row-major order
#[derive(Debug, Clone)]
pub struct ParsedMatrix {
    pub values: Vec<f64>,
    pub rows: usize,
    pub cols: usize,
}

impl ParsedMatrix {
    pub fn into_matrix(self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.rows, self.cols, &self.values)
    }
}

fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b',' || b == b';'
}

fn parse_f64(bytes: &[u8]) -> Option<f64> {
    std::str::from_utf8(bytes).ok()?.parse::<f64>().ok()
}

/// Split one line into fields, `None` if any field is not a number
fn parse_row(line: &[u8], row: &mut Vec<f64>) -> Option<()> {
    row.clear();
    for field in line.split(|&b| is_separator(b)).filter(|f| !f.is_empty()) {
        row.push(parse_f64(field)?);
    }
    Some(())
}

/// Parse a sample × channel matrix from raw bytes (e.g. mmap)
///
/// Fields may be separated by whitespace, commas or semicolons. Empty lines
/// and `#` comments are skipped, as are non-numeric header lines before the
/// first data row. Every data row must have the same number of columns.
pub fn parse_matrix_from_bytes(content: &[u8]) -> Result<ParsedMatrix> {
    let mut values = Vec::new();
    let mut rows = 0usize;
    let mut cols = 0usize;
    let mut current_row = Vec::with_capacity(32);

    for (line_no, raw_line) in content.split(|&b| b == b'\n').enumerate() {
        let line = raw_line.strip_suffix(b"\r").unwrap_or(raw_line);

        let trimmed = line.trim_ascii_start();
        if trimmed.is_empty() || trimmed.first() == Some(&b'#') {
            continue;
        }

        if parse_row(line, &mut current_row).is_none() {
            if rows == 0 {
                log::debug!("Skipping header line {}", line_no + 1);
                continue;
            }
            return Err(ArtifactError::ParseError(format!(
                "Line {} contains a non-numeric field",
                line_no + 1
            )));
        }

        if rows == 0 {
            cols = current_row.len();
        } else if current_row.len() != cols {
            return Err(ArtifactError::ParseError(format!(
                "Line {} has {} columns, expected {}",
                line_no + 1,
                current_row.len(),
                cols
            )));
        }

        values.extend_from_slice(&current_row);
        rows += 1;
    }

    if rows == 0 {
        return Err(ArtifactError::ParseError(
            "No numeric data found in input".to_string(),
        ));
    }

    log::info!("Loaded matrix shape: {} samples × {} channels", rows, cols);

    Ok(ParsedMatrix { values, rows, cols })
}

/// Load a recording from a numeric matrix file
///
/// Without an explicit duration, it is the number of whole seconds covered
/// by the samples.
pub fn load_recording(
    path: &Path,
    sampling_rate: u32,
    duration_secs: Option<u32>,
) -> Result<Recording> {
    if sampling_rate == 0 {
        return Err(ArtifactError::InvalidParameter(
            "Sampling rate must be positive".to_string(),
        ));
    }

    if !path.exists() {
        return Err(ArtifactError::FileNotFound(path.display().to_string()));
    }
    // zero-length files cannot be mapped
    if std::fs::metadata(path)?.len() == 0 {
        return Err(ArtifactError::ParseError(format!(
            "Input file is empty: {}",
            path.display()
        )));
    }

    let mmap = mmap_file(path)?;
    let parsed = parse_matrix_from_bytes(&mmap)?;

    let duration = duration_secs.unwrap_or((parsed.rows / sampling_rate as usize) as u32);
    log::debug!(
        "Recording {}: {} Hz, {} s reported",
        path.display(),
        sampling_rate,
        duration
    );

    Recording::new(parsed.into_matrix(), sampling_rate, duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_whitespace_matrix() {
        let content = b"# exported\n1.0 2.0 3.0\n4.0\t5.0\t6.0\n\n";
        let parsed = parse_matrix_from_bytes(content).unwrap();
        assert_eq!(parsed.rows, 2);
        assert_eq!(parsed.cols, 3);
        assert_eq!(parsed.values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_parse_csv_with_header() {
        let content = b"EKG,Fp1,Fp2\r\n1,2,3\r\n-4,5e1,6\r\n";
        let parsed = parse_matrix_from_bytes(content).unwrap();
        assert_eq!(parsed.rows, 2);
        let matrix = parsed.into_matrix();
        assert_eq!(matrix[(1, 0)], -4.0);
        assert_eq!(matrix[(1, 1)], 50.0);
    }

    #[test]
    fn test_parse_no_trailing_newline() {
        let parsed = parse_matrix_from_bytes(b"1 2\n3 4").unwrap();
        assert_eq!(parsed.rows, 2);
    }

    #[test]
    fn test_parse_indented_comment_after_data() {
        let content = b"1 2\n  # marker\n\t# note\n3 4\n";
        let parsed = parse_matrix_from_bytes(content).unwrap();
        assert_eq!(parsed.rows, 2);
        assert_eq!(parsed.values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_parse_ragged_rows() {
        assert!(parse_matrix_from_bytes(b"1 2 3\n4 5\n").is_err());
    }

    #[test]
    fn test_parse_text_after_data() {
        assert!(parse_matrix_from_bytes(b"1 2\nfoo bar\n").is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_matrix_from_bytes(b"# nothing\n").is_err());
    }

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(FileType::from_extension("txt"), Some(FileType::Ascii));
        assert_eq!(FileType::from_extension("CSV"), Some(FileType::Csv));
        assert_eq!(FileType::from_extension("edf"), None);
    }

    #[test]
    fn test_load_recording_infers_duration() {
        let mut tmp = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        for i in 0..25 {
            writeln!(tmp, "{} {}", i, -i).unwrap();
        }
        let recording = load_recording(tmp.path(), 10, None).unwrap();
        assert_eq!(recording.sample_count(), 25);
        assert_eq!(recording.channel_count(), 2);
        assert_eq!(recording.duration_secs(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_recording(Path::new("/nonexistent/rec.txt"), 256, None);
        assert!(matches!(result, Err(ArtifactError::FileNotFound(_))));
    }
}

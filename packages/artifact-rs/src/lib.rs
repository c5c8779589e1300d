//! Block-based artifact detection for multi-channel EEG recordings.
//!
//! A recording is cut into fixed 4 s blocks. Three independent detectors
//! (EEP amplitude outliers, ECG correlation, LFP spectral ratio) each yield
//! one flag per block, and flagged blocks become `[start, end)` sample
//! intervals written as a `Start`/`End` table.

pub mod aggregate;
pub mod blocks;
pub mod detectors;
pub mod error;
pub mod intervals;
pub mod mmap_utils;
pub mod parser;
pub mod profiling;
pub mod runner;
pub mod spectral;
pub mod stats;
pub mod thresholds;
pub mod types;

pub use aggregate::aggregate_channels;
pub use blocks::BlockGrid;
pub use detectors::{DetectionOutcome, DetectorKind, DetectorMetadata, DETECTOR_REGISTRY};
pub use error::{ArtifactError, Result};
pub use intervals::{
    extract_intervals, format_interval_table, parse_interval_table, read_interval_file,
    write_interval_file, WriteOutcome, DEFAULT_OUTPUT_FILE,
};
pub use parser::{load_recording, FileType};
pub use runner::ArtifactRunner;
pub use types::*;

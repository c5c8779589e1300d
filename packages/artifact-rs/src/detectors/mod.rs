//! The three fixed artifact detectors and the per-channel sweep they share

pub mod ecg;
pub mod eep;
pub mod lfp;

use crate::aggregate::merge_flags;
use crate::blocks::BlockGrid;
use crate::error::{ArtifactError, Result};
use crate::types::{ChannelFailure, ChannelLayout, DetectionConfig, DetectionResult, Recording};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub use ecg::perform_ecg_detection;
pub use eep::perform_eep_detection;
pub use lfp::perform_lfp_detection;

/// Detector selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectorKind {
    #[serde(rename = "EEP")]
    Eep,
    #[serde(rename = "ECG")]
    Ecg,
    #[serde(rename = "LFP")]
    Lfp,
}

/// Static description of a detector
#[derive(Debug, Clone, Serialize)]
pub struct DetectorMetadata {
    pub kind: DetectorKind,
    pub abbreviation: &'static str,
    pub name: &'static str,
    /// Fixed text attached to every detection result of this detector
    pub message: &'static str,
    /// Runs per EEG channel and is OR-aggregated across channels
    pub per_channel: bool,
    pub documentation: &'static str,
}

pub const EEP: DetectorMetadata = DetectorMetadata {
    kind: DetectorKind::Eep,
    abbreviation: "EEP",
    name: "External Electrostatic Potential",
    message: "An artifact reflected by the external electrostatic potential occurrence has been detected in this block",
    per_channel: true,
    documentation: "Flags blocks whose log-scaled minimum or maximum lies more than six standard deviations above the channel median.",
};

pub const ECG: DetectorMetadata = DetectorMetadata {
    kind: DetectorKind::Ecg,
    abbreviation: "ECG",
    name: "ECG Contamination",
    message: "An artifact derived from ECG has been detected in this block",
    per_channel: false,
    documentation: "Flags blocks where the strongest Pearson correlation between the ECG reference and any EEG channel exceeds 0.9.",
};

pub const LFP: DetectorMetadata = DetectorMetadata {
    kind: DetectorKind::Lfp,
    abbreviation: "LFP",
    name: "Low-Frequency Potential",
    message: "An artifact reflected by the low-frequency potential occurrence has been detected in this block",
    per_channel: true,
    documentation: "Flags blocks whose share of spectral energy below the lambda frequency exceeds 0.75 + 0.25 * channel median.",
};

pub const DETECTOR_REGISTRY: &[DetectorMetadata] = &[EEP, ECG, LFP];

impl DetectorKind {
    pub fn metadata(&self) -> &'static DetectorMetadata {
        match self {
            Self::Eep => &EEP,
            Self::Ecg => &ECG,
            Self::Lfp => &LFP,
        }
    }

    /// Look up detector by abbreviation (case-insensitive)
    pub fn from_abbrev(abbrev: &str) -> Option<Self> {
        DETECTOR_REGISTRY
            .iter()
            .find(|d| d.abbreviation.eq_ignore_ascii_case(abbrev))
            .map(|d| d.kind)
    }

    pub fn abbreviation(&self) -> &'static str {
        self.metadata().abbreviation
    }

    pub fn all() -> impl Iterator<Item = DetectorKind> {
        DETECTOR_REGISTRY.iter().map(|d| d.kind)
    }

    /// Run this detector over a whole recording
    pub fn run(
        &self,
        recording: &Recording,
        layout: ChannelLayout,
        config: &DetectionConfig,
    ) -> Result<DetectionOutcome> {
        match self {
            Self::Eep => perform_eep_detection(recording, layout, config),
            Self::Ecg => perform_ecg_detection(recording, layout, config),
            Self::Lfp => perform_lfp_detection(recording, layout, config),
        }
    }
}

impl std::fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Flags produced by one detector on one channel
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDetection {
    pub flags: Vec<bool>,
    pub block_count: usize,
    /// Blocks whose statistic was undefined and left out of thresholding
    pub degenerate_blocks: Vec<usize>,
}

impl ChannelDetection {
    pub fn new(flags: Vec<bool>) -> Self {
        let block_count = flags.len();
        Self {
            flags,
            block_count,
            degenerate_blocks: Vec::new(),
        }
    }
}

/// Detection result plus the conditions that did not abort the recording
#[derive(Debug, Clone)]
pub struct DetectionOutcome {
    pub result: DetectionResult,
    pub channel_failures: Vec<ChannelFailure>,
    pub degenerate_blocks: Vec<usize>,
}

/// Run a per-channel detector on every EEG column and OR the results
///
/// A channel whose pass fails is recorded in `channel_failures`; the
/// recording only fails when no channel succeeds. Channels are evaluated in
/// parallel and merged in column order.
pub(crate) fn sweep_channels<F>(
    kind: DetectorKind,
    recording: &Recording,
    layout: ChannelLayout,
    grid: &BlockGrid,
    detect: F,
) -> Result<DetectionOutcome>
where
    F: Fn(&[f64]) -> Result<ChannelDetection> + Sync,
{
    let columns = layout.eeg_columns();
    if columns.end > recording.channel_count() {
        return Err(ArtifactError::ShapeMismatch(format!(
            "{:?} layout needs {} columns, recording has {}",
            layout,
            columns.end,
            recording.channel_count()
        )));
    }
    grid.check_fits(recording.sample_count())?;

    let outcomes: Vec<(usize, Result<ChannelDetection>)> = columns
        .into_par_iter()
        .map(|column| {
            let detection = recording.channel(column).and_then(|series| detect(&series));
            (column, detection)
        })
        .collect();

    let mut aggregate: Option<Vec<bool>> = None;
    let mut failures = Vec::new();
    let mut degenerate_blocks = Vec::new();
    let mut first_error = None;

    for (column, outcome) in outcomes {
        match outcome {
            Ok(detection) => {
                log::debug!(
                    "{} channel {}: {}/{} blocks flagged",
                    kind,
                    column,
                    detection.flags.iter().filter(|&&f| f).count(),
                    detection.block_count
                );
                degenerate_blocks.extend_from_slice(&detection.degenerate_blocks);
                match aggregate.as_mut() {
                    Some(acc) => merge_flags(acc, &detection.flags),
                    None => aggregate = Some(detection.flags),
                }
            }
            Err(e) => {
                log::warn!("{} detection failed on channel {}: {}", kind, column, e);
                failures.push(ChannelFailure {
                    channel: column,
                    error: e.to_string(),
                });
                first_error.get_or_insert(e);
            }
        }
    }

    let flags = match (aggregate, first_error) {
        (Some(flags), _) => flags,
        (None, Some(e)) => return Err(e),
        (None, None) => Vec::new(),
    };

    degenerate_blocks.sort_unstable();
    degenerate_blocks.dedup();

    Ok(DetectionOutcome {
        result: DetectionResult::new(kind, flags),
        channel_failures: failures,
        degenerate_blocks,
    })
}

//! External electrostatic potential (EEP) detection: amplitude outliers per block

use super::{sweep_channels, ChannelDetection, DetectionOutcome, DetectorKind};
use crate::blocks::BlockGrid;
use crate::error::Result;
use crate::thresholds::{eep_thresholds, EepThresholds};
use crate::types::{ChannelLayout, DetectionConfig, Recording};

/// (min, max) of each block of a channel
pub fn block_extrema(series: &[f64], grid: &BlockGrid) -> Vec<(f64, f64)> {
    grid.ranges()
        .map(|range| {
            series[range]
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                    (lo.min(x), hi.max(x))
                })
        })
        .collect()
}

/// Decide one block against the channel thresholds
///
/// With both extrema nonzero the log10 magnitudes are compared. If either
/// extremum is exactly zero the raw values are compared against the same
/// log-domain thresholds instead.
pub fn is_eep_artifact(min: f64, max: f64, thresholds: &EepThresholds) -> bool {
    if min != 0.0 && max != 0.0 {
        min.abs().log10() > thresholds.min || max.abs().log10() > thresholds.max
    } else {
        min > thresholds.min || max > thresholds.max
    }
}

/// EEP flags for a single channel
pub fn detect_eep(
    series: &[f64],
    grid: &BlockGrid,
    config: &DetectionConfig,
) -> Result<ChannelDetection> {
    grid.check_fits(series.len())?;

    let extrema = block_extrema(series, grid);
    let thresholds = eep_thresholds(&extrema, config.eep_sigma_multiplier)?;

    let flags = extrema
        .iter()
        .map(|&(min, max)| is_eep_artifact(min, max, &thresholds))
        .collect();

    Ok(ChannelDetection::new(flags))
}

/// EEP detection over every EEG channel, OR-aggregated per block
pub fn perform_eep_detection(
    recording: &Recording,
    layout: ChannelLayout,
    config: &DetectionConfig,
) -> Result<DetectionOutcome> {
    let grid = BlockGrid::new(
        recording.duration_secs(),
        recording.sampling_rate(),
        config.block_duration_secs,
    )?;

    log::info!(
        "EEP detection: {} channels, {} blocks of {} samples",
        layout.eeg_channel_count(),
        grid.block_count(),
        grid.block_samples()
    );

    sweep_channels(DetectorKind::Eep, recording, layout, &grid, |series| {
        detect_eep(series, &grid, config)
    })
}

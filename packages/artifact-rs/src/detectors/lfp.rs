//! Low-frequency potential (LFP) detection: spectral energy concentrated near DC

use super::{sweep_channels, ChannelDetection, DetectionOutcome, DetectorKind};
use crate::blocks::BlockGrid;
use crate::error::{ArtifactError, Result};
use crate::spectral::{fourier_ratio, RatioBands};
use crate::thresholds::lfp_threshold;
use crate::types::{ChannelLayout, DetectionConfig, Recording};

pub fn ratio_bands(sampling_rate: u32, config: &DetectionConfig) -> RatioBands {
    RatioBands {
        lambda_frequency: config.lambda_frequency,
        nyquist_frequency: sampling_rate as f64 / 2.0,
        electric_frequency: config.electric_frequency,
        notch_half_width: config.notch_half_width,
    }
}

/// Fourier ratio per block; degenerate blocks come back as NaN with their indices
pub fn block_ratios(
    series: &[f64],
    grid: &BlockGrid,
    sampling_rate: u32,
    bands: &RatioBands,
) -> Result<(Vec<f64>, Vec<usize>)> {
    let mut ratios = Vec::with_capacity(grid.block_count());
    let mut degenerate = Vec::new();

    for (block, range) in grid.ranges().enumerate() {
        match fourier_ratio(&series[range], sampling_rate, bands) {
            Ok(ratio) => ratios.push(ratio),
            Err(ArtifactError::DegenerateRatio { numerator }) => {
                log::warn!(
                    "Block {}: low-frequency energy {:.3e} over zero in-band energy, ratio left undefined",
                    block,
                    numerator
                );
                ratios.push(f64::NAN);
                degenerate.push(block);
            }
            Err(e) => return Err(e),
        }
    }

    Ok((ratios, degenerate))
}

/// LFP flags for a single channel
pub fn detect_lfp(
    series: &[f64],
    grid: &BlockGrid,
    sampling_rate: u32,
    config: &DetectionConfig,
) -> Result<ChannelDetection> {
    grid.check_fits(series.len())?;

    let bands = ratio_bands(sampling_rate, config);
    let (ratios, degenerate_blocks) = block_ratios(series, grid, sampling_rate, &bands)?;
    let threshold = lfp_threshold(&ratios, config)?;

    // NaN never exceeds the threshold
    let flags = ratios.iter().map(|&r| r > threshold).collect();

    let mut detection = ChannelDetection::new(flags);
    detection.degenerate_blocks = degenerate_blocks;
    Ok(detection)
}

/// LFP detection over every EEG channel, OR-aggregated per block
pub fn perform_lfp_detection(
    recording: &Recording,
    layout: ChannelLayout,
    config: &DetectionConfig,
) -> Result<DetectionOutcome> {
    let sampling_rate = recording.sampling_rate();
    let grid = BlockGrid::new(
        recording.duration_secs(),
        sampling_rate,
        config.block_duration_secs,
    )?;

    log::info!(
        "LFP detection: {} channels, {} blocks, lambda {} Hz, mains {} Hz",
        layout.eeg_channel_count(),
        grid.block_count(),
        config.lambda_frequency,
        config.electric_frequency
    );

    sweep_channels(DetectorKind::Lfp, recording, layout, &grid, |series| {
        detect_lfp(series, &grid, sampling_rate, config)
    })
}

//! Decision thresholds derived from a channel's own block statistics

use crate::error::{ArtifactError, Result};
use crate::stats::{log_magnitude, median, sample_std_dev};
use crate::types::DetectionConfig;
use serde::{Deserialize, Serialize};

/// Minimum number of blocks needed to derive a data-driven threshold
pub const MIN_BLOCKS: usize = 2;

/// Outlier limits for block minima and maxima, in log10 units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EepThresholds {
    pub min: f64,
    pub max: f64,
}

/// EEP thresholds: `median + sigma * stddev` of the log-transformed extrema
///
/// Each extremum becomes `log10(|x|)`, except exact zeros which stay 0.
pub fn eep_thresholds(extrema: &[(f64, f64)], sigma_multiplier: f64) -> Result<EepThresholds> {
    ensure_enough_blocks(extrema.len())?;

    let (mins, maxs): (Vec<f64>, Vec<f64>) = extrema
        .iter()
        .map(|&(lo, hi)| (log_magnitude(lo), log_magnitude(hi)))
        .unzip();

    Ok(EepThresholds {
        min: median(&mins)? + sigma_multiplier * sample_std_dev(&mins)?,
        max: median(&maxs)? + sigma_multiplier * sample_std_dev(&maxs)?,
    })
}

/// Fixed correlation cutoff for ECG contamination
pub fn ecg_threshold(config: &DetectionConfig) -> f64 {
    config.ecg_threshold
}

/// LFP threshold: `base + weight * median(ratios)`
///
/// NaN ratios (degenerate blocks) are left out of the median.
pub fn lfp_threshold(ratios: &[f64], config: &DetectionConfig) -> Result<f64> {
    let valid: Vec<f64> = ratios.iter().copied().filter(|r| !r.is_nan()).collect();
    ensure_enough_blocks(valid.len())?;

    Ok(config.lfp_base + config.lfp_median_weight * median(&valid)?)
}

fn ensure_enough_blocks(found: usize) -> Result<()> {
    if found < MIN_BLOCKS {
        return Err(ArtifactError::InsufficientData {
            found,
            required: MIN_BLOCKS,
        });
    }
    Ok(())
}

//! ECG contamination detection: EEG channels tracking the ECG reference

use super::{DetectionOutcome, DetectorKind};
use crate::blocks::BlockGrid;
use crate::error::{ArtifactError, Result};
use crate::stats::pearson;
use crate::thresholds::ecg_threshold;
use crate::types::{ChannelLayout, DetectionConfig, DetectionResult, Recording};

/// Column holding the ECG reference
pub const ECG_COLUMN: usize = 0;

/// Strongest signed correlation between the ECG segment and any EEG segment
///
/// NaN coefficients (flat segments) are skipped; 0 when none remain.
pub fn block_representative(ecg: &[f64], eeg: &[&[f64]]) -> f64 {
    eeg.iter()
        .map(|channel| pearson(ecg, channel))
        .filter(|r| !r.is_nan())
        .fold(None, |acc: Option<f64>, r| Some(acc.map_or(r, |m| m.max(r))))
        .unwrap_or(0.0)
}

/// ECG detection over all channels at once, one flag per block
pub fn perform_ecg_detection(
    recording: &Recording,
    layout: ChannelLayout,
    config: &DetectionConfig,
) -> Result<DetectionOutcome> {
    let grid = BlockGrid::new(
        recording.duration_secs(),
        recording.sampling_rate(),
        config.block_duration_secs,
    )?;

    let columns = layout.ecg_compared_columns();
    if columns.end > recording.channel_count() {
        return Err(ArtifactError::ShapeMismatch(format!(
            "ECG detection needs an ECG column plus {} EEG columns, recording has {} columns",
            layout.eeg_channel_count(),
            recording.channel_count()
        )));
    }
    grid.check_fits(recording.sample_count())?;

    log::info!(
        "ECG detection: {} channels against column {}, {} blocks",
        layout.eeg_channel_count(),
        ECG_COLUMN,
        grid.block_count()
    );

    let threshold = ecg_threshold(config);
    let ecg = recording.channel(ECG_COLUMN)?;
    let eeg: Vec<Vec<f64>> = columns
        .map(|c| recording.channel(c))
        .collect::<Result<_>>()?;

    let flags = grid
        .ranges()
        .enumerate()
        .map(|(block, range)| {
            let segments: Vec<&[f64]> = eeg.iter().map(|ch| &ch[range.clone()]).collect();
            let representative = block_representative(&ecg[range], &segments);
            log::trace!("ECG block {}: max coefficient {:.4}", block, representative);
            representative > threshold
        })
        .collect();

    Ok(DetectionOutcome {
        result: DetectionResult::new(DetectorKind::Ecg, flags),
        channel_failures: Vec::new(),
        degenerate_blocks: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_representative_is_signed_max() {
        let ecg = [1.0, 2.0, 3.0, 4.0];
        let anti = [-1.0, -2.0, -3.0, -4.0];
        let weak = [1.0, -1.0, -1.0, 1.0];
        let r = block_representative(&ecg, &[&anti, &weak]);
        assert!(r.abs() < 1e-12);
    }

    #[test]
    fn test_representative_perfect_correlation() {
        let ecg = [1.0, 2.0, 3.0, 4.0];
        let same = [2.0, 4.0, 6.0, 8.0];
        let flat = [0.0; 4];
        let r = block_representative(&ecg, &[&flat, &same]);
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_representative_all_nan_is_zero() {
        let ecg = [1.0, 1.0, 1.0];
        let other = [1.0, 2.0, 3.0];
        assert_eq!(block_representative(&ecg, &[&other, &other]), 0.0);
    }

    #[test]
    fn test_only_negative_coefficients_give_negative_representative() {
        let ecg = [1.0, 2.0, 3.0, 4.0];
        let anti = [-1.0, -2.0, -3.0, -4.0];
        let r = block_representative(&ecg, &[&anti]);
        assert!((r + 1.0).abs() < 1e-12);
    }
}

use crate::error::{ArtifactError, Result};
use std::ops::Range;

/// Fixed, non-overlapping segmentation of a recording into equal blocks
///
/// The block count comes from the reported duration, not the sample count,
/// so samples past `block_count * block_samples` are never visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    block_samples: usize,
    block_count: usize,
}

impl BlockGrid {
    pub fn new(duration_secs: u32, sampling_rate: u32, block_duration_secs: u32) -> Result<Self> {
        if block_duration_secs == 0 {
            return Err(ArtifactError::InvalidParameter(
                "Block duration must be positive".to_string(),
            ));
        }
        if sampling_rate == 0 {
            return Err(ArtifactError::InvalidParameter(
                "Sampling rate must be positive".to_string(),
            ));
        }

        Ok(Self {
            block_samples: block_duration_secs as usize * sampling_rate as usize,
            block_count: (duration_secs / block_duration_secs) as usize,
        })
    }

    pub fn block_samples(&self) -> usize {
        self.block_samples
    }

    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// Number of samples the grid spans
    pub fn covered_samples(&self) -> usize {
        self.block_count * self.block_samples
    }

    pub fn block_range(&self, block: usize) -> Range<usize> {
        let start = block * self.block_samples;
        start..start + self.block_samples
    }

    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.block_count).map(move |b| self.block_range(b))
    }

    /// Fail if a series is too short to fill every block
    pub fn check_fits(&self, sample_count: usize) -> Result<()> {
        if sample_count < self.covered_samples() {
            return Err(ArtifactError::ShapeMismatch(format!(
                "{} blocks of {} samples need {} samples, recording has {}",
                self.block_count,
                self.block_samples,
                self.covered_samples(),
                sample_count
            )));
        }
        Ok(())
    }
}

use crate::blocks::BlockGrid;
use crate::detectors::DetectorKind;
use crate::error::Result;
use crate::intervals::extract_intervals;
use crate::parser::load_recording;
use crate::profile_scope;
use crate::types::{ArtifactReport, ChannelLayout, DetectionConfig, Recording};
use std::path::Path;
use uuid::Uuid;

/// Artifact detection runner
///
/// Holds the detection constants and turns recordings into reports. Each
/// call is independent; nothing is cached between recordings.
#[derive(Debug, Clone, Default)]
pub struct ArtifactRunner {
    config: DetectionConfig,
}

impl ArtifactRunner {
    /// Create a runner, rejecting unusable configuration values
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Run one detector on an in-memory recording
    ///
    /// # Arguments
    /// * `recording` - Sample × channel data with rate and reported duration
    /// * `eeg_channel_count` - 19 (ECG in column 0) or 20
    /// * `detector` - Which of the three detectors to run
    pub fn detect(
        &self,
        recording: &Recording,
        eeg_channel_count: usize,
        detector: DetectorKind,
    ) -> Result<ArtifactReport> {
        let layout = ChannelLayout::from_eeg_count(eeg_channel_count)?;
        let grid = BlockGrid::new(
            recording.duration_secs(),
            recording.sampling_rate(),
            self.config.block_duration_secs,
        )?;

        log::info!(
            "Running {} detection: {} samples × {} channels, {} Hz, {} s",
            detector,
            recording.sample_count(),
            recording.channel_count(),
            recording.sampling_rate(),
            recording.duration_secs()
        );

        let outcome = {
            profile_scope!(format!("{} detection", detector));
            detector.run(recording, layout, &self.config)?
        };

        let intervals = extract_intervals(&outcome.result.flags, grid.block_samples());

        log::info!(
            "{} detection flagged {}/{} blocks",
            detector,
            outcome.result.flagged_count(),
            outcome.result.block_count()
        );
        if !outcome.channel_failures.is_empty() {
            log::warn!(
                "{} detection skipped {} channel(s)",
                detector,
                outcome.channel_failures.len()
            );
        }

        Ok(ArtifactReport {
            id: Uuid::new_v4().to_string(),
            source: None,
            detector,
            message: outcome.result.message,
            sampling_rate: recording.sampling_rate(),
            duration_secs: recording.duration_secs(),
            block_count: grid.block_count(),
            block_samples: grid.block_samples(),
            flags: outcome.result.flags,
            intervals,
            channel_failures: outcome.channel_failures,
            degenerate_blocks: outcome.degenerate_blocks,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Run all three detectors on the same recording
    pub fn detect_all(
        &self,
        recording: &Recording,
        eeg_channel_count: usize,
    ) -> Result<Vec<ArtifactReport>> {
        DetectorKind::all()
            .map(|kind| self.detect(recording, eeg_channel_count, kind))
            .collect()
    }

    /// Load a matrix file and run one detector on it
    pub fn run_file(
        &self,
        path: &Path,
        sampling_rate: u32,
        duration_secs: Option<u32>,
        eeg_channel_count: usize,
        detector: DetectorKind,
    ) -> Result<ArtifactReport> {
        // layout errors abort before the file is read
        ChannelLayout::from_eeg_count(eeg_channel_count)?;

        let recording = {
            profile_scope!(format!("load {}", path.display()));
            load_recording(path, sampling_rate, duration_secs)?
        };

        Ok(self
            .detect(&recording, eeg_channel_count, detector)?
            .with_source(path.display().to_string()))
    }
}

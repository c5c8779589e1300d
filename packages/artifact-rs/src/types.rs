use crate::detectors::DetectorKind;
use crate::error::{ArtifactError, Result};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Multi-channel recording as a [samples × channels] matrix
///
/// Column 0 holds the ECG reference when the layout provides one.
#[derive(Debug, Clone)]
pub struct Recording {
    data: DMatrix<f64>,
    sampling_rate: u32,
    duration_secs: u32,
}

impl Recording {
    /// Create a recording from a [samples × channels] matrix
    ///
    /// `duration_secs` is taken as reported by the source and is not checked
    /// against the sample count.
    pub fn new(data: DMatrix<f64>, sampling_rate: u32, duration_secs: u32) -> Result<Self> {
        if sampling_rate == 0 {
            return Err(ArtifactError::InvalidParameter(
                "Sampling rate must be positive".to_string(),
            ));
        }

        Ok(Self {
            data,
            sampling_rate,
            duration_secs,
        })
    }

    /// Create a recording from row-major samples (one inner Vec per sample)
    pub fn from_rows(rows: &[Vec<f64>], sampling_rate: u32, duration_secs: u32) -> Result<Self> {
        let n_channels = rows.first().map(|r| r.len()).unwrap_or(0);

        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_channels) {
            return Err(ArtifactError::ShapeMismatch(format!(
                "Sample {} has {} channels, expected {}",
                idx,
                row.len(),
                n_channels
            )));
        }

        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let data = DMatrix::from_row_slice(rows.len(), n_channels, &flat);
        Self::new(data, sampling_rate, duration_secs)
    }

    pub fn sample_count(&self) -> usize {
        self.data.nrows()
    }

    pub fn channel_count(&self) -> usize {
        self.data.ncols()
    }

    pub fn sampling_rate(&self) -> u32 {
        self.sampling_rate
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Copy one channel (matrix column) out of the recording
    pub fn channel(&self, index: usize) -> Result<Vec<f64>> {
        if index >= self.channel_count() {
            return Err(ArtifactError::ShapeMismatch(format!(
                "Channel {} requested but recording has {} channels",
                index,
                self.channel_count()
            )));
        }
        Ok(self.data.column(index).iter().copied().collect())
    }
}

/// Recognized EEG channel layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelLayout {
    /// 19 EEG channels preceded by an ECG column
    Nineteen,
    /// 20 EEG channels starting at column 0
    Twenty,
}

impl ChannelLayout {
    pub fn from_eeg_count(count: usize) -> Result<Self> {
        match count {
            19 => Ok(Self::Nineteen),
            20 => Ok(Self::Twenty),
            other => Err(ArtifactError::UnsupportedLayout(other)),
        }
    }

    pub fn eeg_channel_count(&self) -> usize {
        match self {
            Self::Nineteen => 19,
            Self::Twenty => 20,
        }
    }

    /// Column offset of the first EEG channel for per-channel detectors
    pub fn channel_offset(&self) -> usize {
        match self {
            Self::Nineteen => 1,
            Self::Twenty => 0,
        }
    }

    /// Matrix columns scanned by the EEP and LFP detectors
    pub fn eeg_columns(&self) -> Range<usize> {
        let offset = self.channel_offset();
        offset..offset + self.eeg_channel_count()
    }

    /// Columns correlated against the ECG reference in column 0
    pub fn ecg_compared_columns(&self) -> Range<usize> {
        1..self.eeg_channel_count() + 1
    }
}

/// Tunable detection constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Block length in seconds (default 4)
    pub block_duration_secs: u32,
    /// Pearson coefficient above which a block is ECG-contaminated (default 0.9)
    pub ecg_threshold: f64,
    /// Standard deviations above the median for EEP thresholds (default 6)
    pub eep_sigma_multiplier: f64,
    /// Constant term of the LFP threshold (default 0.75)
    pub lfp_base: f64,
    /// Weight of the channel's median ratio in the LFP threshold (default 0.25)
    pub lfp_median_weight: f64,
    /// Low-frequency cutoff in Hz (default 0.625)
    pub lambda_frequency: f64,
    /// Mains frequency in Hz (default 50)
    pub electric_frequency: f64,
    /// Half width of the mains notch in Hz (default 2)
    pub notch_half_width: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            block_duration_secs: 4,
            ecg_threshold: 0.9,
            eep_sigma_multiplier: 6.0,
            lfp_base: 0.75,
            lfp_median_weight: 0.25,
            lambda_frequency: 0.625,
            electric_frequency: 50.0,
            notch_half_width: 2.0,
        }
    }
}

impl DetectionConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| ArtifactError::ParseError(format!("Invalid detection config: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_duration_secs == 0 {
            return Err(ArtifactError::InvalidParameter(
                "Block duration must be positive".to_string(),
            ));
        }
        if !self.lambda_frequency.is_finite() || self.lambda_frequency <= 0.0 {
            return Err(ArtifactError::InvalidParameter(format!(
                "Lambda frequency must be positive, got {}",
                self.lambda_frequency
            )));
        }
        if !self.electric_frequency.is_finite() || self.electric_frequency <= 0.0 {
            return Err(ArtifactError::InvalidParameter(format!(
                "Electric frequency must be positive, got {}",
                self.electric_frequency
            )));
        }
        let constants = [
            ("ecg_threshold", self.ecg_threshold),
            ("eep_sigma_multiplier", self.eep_sigma_multiplier),
            ("lfp_base", self.lfp_base),
            ("lfp_median_weight", self.lfp_median_weight),
            ("notch_half_width", self.notch_half_width),
        ];
        if let Some((name, value)) = constants.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ArtifactError::InvalidParameter(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
        Ok(())
    }
}

/// Per-block decision of one detector over a whole recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub detector: DetectorKind,
    pub flags: Vec<bool>,
    pub message: String,
}

impl DetectionResult {
    pub fn new(detector: DetectorKind, flags: Vec<bool>) -> Self {
        Self {
            detector,
            flags,
            message: detector.metadata().message.to_string(),
        }
    }

    pub fn block_count(&self) -> usize {
        self.flags.len()
    }

    pub fn flagged_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }
}

/// Contaminated span in sample indices, `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactInterval {
    pub start: u64,
    pub end: u64,
}

/// Channel whose detector pass failed without aborting the recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelFailure {
    pub channel: usize,
    pub error: String,
}

/// Detection outcome for one recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactReport {
    pub id: String,
    pub source: Option<String>,
    pub detector: DetectorKind,
    pub message: String,
    pub sampling_rate: u32,
    pub duration_secs: u32,
    pub block_count: usize,
    pub block_samples: usize,
    pub flags: Vec<bool>,
    pub intervals: Vec<ArtifactInterval>,
    pub channel_failures: Vec<ChannelFailure>,
    pub degenerate_blocks: Vec<usize>,
    pub created_at: String,
}

impl ArtifactReport {
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn flagged_count(&self) -> usize {
        self.intervals.len()
    }
}

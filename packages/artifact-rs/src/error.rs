use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Unsupported channel layout: {0} EEG channels (expected 19 or 20)")]
    UnsupportedLayout(usize),

    #[error("Insufficient data: {found} block(s) available, at least {required} required")]
    InsufficientData { found: usize, required: usize },

    #[error("Degenerate Fourier ratio: numerator {numerator} over zero denominator")]
    DegenerateRatio { numerator: f64 },

    #[error("Recording shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Input file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse input: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ArtifactError>;

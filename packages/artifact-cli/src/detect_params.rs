use crate::cli::DetectionArgs;
use artifact_rs::{ArtifactRunner, ChannelLayout, DetectionConfig, DetectorKind, FileType};
use std::path::Path;

/// Validate a single file path: existence and supported extension.
pub fn validate_file(file_path: &str) -> Result<(), String> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("Input file not found: {}", file_path));
    }

    if FileType::from_path(path).is_none() {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        return Err(format!(
            "Unsupported file extension '{}'. Supported: asc, ascii, txt, dat, csv, tsv",
            ext
        ));
    }

    Ok(())
}

pub fn parse_detector(abbrev: &str) -> Result<DetectorKind, String> {
    DetectorKind::from_abbrev(abbrev).ok_or_else(|| {
        format!(
            "Unknown detector '{}'. Valid detectors: EEP, ECG, LFP",
            abbrev
        )
    })
}

/// Validate detection parameters shared by every input file.
pub fn validate_common_params(args: &DetectionArgs) -> Result<DetectorKind, String> {
    if args.sr == 0 {
        return Err("Sampling rate (--sr) must be greater than 0".to_string());
    }
    if args.duration == Some(0) {
        return Err("Duration (--duration) must be greater than 0".to_string());
    }
    ChannelLayout::from_eeg_count(args.eeg_channels).map_err(|e| e.to_string())?;
    parse_detector(&args.detector)
}

/// Config file (if any) with command-line overrides applied on top.
pub fn resolve_config(args: &DetectionArgs) -> Result<DetectionConfig, String> {
    let mut config = match args.config {
        Some(ref path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;
            DetectionConfig::from_json(&content).map_err(|e| e.to_string())?
        }
        None => DetectionConfig::default(),
    };

    if let Some(lambda) = args.lambda {
        config.lambda_frequency = lambda;
    }
    if let Some(mains) = args.mains {
        config.electric_frequency = mains;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

pub fn build_runner(args: &DetectionArgs) -> Result<(ArtifactRunner, DetectorKind), String> {
    let detector = validate_common_params(args)?;
    let config = resolve_config(args)?;
    let runner = ArtifactRunner::new(config).map_err(|e| e.to_string())?;
    Ok((runner, detector))
}

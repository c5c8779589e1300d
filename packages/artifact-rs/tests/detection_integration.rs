use artifact_rs::{
    read_interval_file, write_interval_file, ArtifactError, ArtifactInterval, ArtifactRunner,
    DetectionConfig, DetectorKind, Recording, WriteOutcome,
};
use std::f64::consts::PI;
use std::io::Write;

const SR: u32 = 256;

/// [samples × 20] recording where every column alternates between -5 and 7
fn quiet_rows(samples: usize) -> Vec<Vec<f64>> {
    (0..samples)
        .map(|i| vec![if i % 2 == 0 { -5.0 } else { 7.0 }; 20])
        .collect()
}

fn flagged_blocks(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(i, &f)| f.then_some(i))
        .collect()
}

#[test]
fn test_eep_flags_single_outlier_block() {
    // 16 s at 256 Hz -> 4 blocks of 1024 samples
    let mut rows = quiet_rows(16 * SR as usize);
    rows[2 * 1024 + 10][3] = -2e4;
    rows[2 * 1024 + 11][3] = 3e4;
    let recording = Recording::from_rows(&rows, SR, 16).unwrap();

    // one outlier among four blocks sits 1.5 sd above the mean at most,
    // so the default six-sigma band needs a narrower multiplier here
    let config = DetectionConfig {
        eep_sigma_multiplier: 1.0,
        ..DetectionConfig::default()
    };
    let runner = ArtifactRunner::new(config).unwrap();
    let report = runner.detect(&recording, 19, DetectorKind::Eep).unwrap();

    assert_eq!(report.block_count, 4);
    assert_eq!(report.flags, vec![false, false, true, false]);
    assert_eq!(
        report.intervals,
        vec![ArtifactInterval {
            start: 2048,
            end: 3072
        }]
    );
    assert!(report.channel_failures.is_empty());
}

#[test]
fn test_eep_default_sigma_needs_many_blocks() {
    let mut rows = quiet_rows(16 * SR as usize);
    rows[2 * 1024 + 10][3] = -2e4;
    rows[2 * 1024 + 11][3] = 3e4;
    let recording = Recording::from_rows(&rows, SR, 16).unwrap();

    let report = ArtifactRunner::default()
        .detect(&recording, 19, DetectorKind::Eep)
        .unwrap();
    assert!(flagged_blocks(&report.flags).is_empty());
}

#[test]
fn test_eep_default_sigma_on_long_recording() {
    // 40 blocks of 4 samples (1 Hz)
    let sr = 1;
    let mut rows = quiet_rows(160);
    rows[4 * 25 + 1][7] = 3e4;
    let recording = Recording::from_rows(&rows, sr, 160).unwrap();

    let report = ArtifactRunner::default()
        .detect(&recording, 20, DetectorKind::Eep)
        .unwrap();
    assert_eq!(flagged_blocks(&report.flags), vec![25]);
    assert_eq!(report.intervals[0].start, 100);
    assert_eq!(report.intervals[0].end, 104);
}

#[test]
fn test_trailing_samples_ignored() {
    // 18.5 s of samples, reported as 18 s -> 4 blocks, last 2.5 s never read
    let mut rows = quiet_rows(18 * SR as usize + SR as usize / 2);
    let tail = rows.len() - 1;
    rows[tail][5] = 1e9;
    let recording = Recording::from_rows(&rows, SR, 18).unwrap();

    let report = ArtifactRunner::default()
        .detect(&recording, 19, DetectorKind::Eep)
        .unwrap();
    assert_eq!(report.block_count, 4);
    assert!(report.block_count * report.block_samples <= recording.sample_count());
    assert!(flagged_blocks(&report.flags).is_empty());
}

#[test]
fn test_ecg_detection_sign_handling() {
    let block = 4 * SR as usize;
    let ecg: Vec<f64> = (0..4 * block)
        .map(|i| (2.0 * PI * 1.3 * i as f64 / SR as f64).sin() + 0.1 * (i % 7) as f64)
        .collect();

    let mut rows = vec![vec![0.0; 20]; 4 * block];
    for (i, row) in rows.iter_mut().enumerate() {
        row[0] = ecg[i];
    }
    // block 1: channel 4 copies ECG, block 2: channel 4 inverts it
    for i in block..2 * block {
        rows[i][4] = ecg[i];
    }
    for i in 2 * block..3 * block {
        rows[i][4] = -ecg[i];
    }
    let recording = Recording::from_rows(&rows, SR, 16).unwrap();

    let report = ArtifactRunner::default()
        .detect(&recording, 19, DetectorKind::Ecg)
        .unwrap();
    assert_eq!(report.flags, vec![false, true, false, false]);
    assert_eq!(
        report.message,
        "An artifact derived from ECG has been detected in this block"
    );
}

#[test]
fn test_ecg_needs_reference_column() {
    // 20 EEG channels compare columns 1..=20, so 20 columns are not enough
    let recording = Recording::from_rows(&quiet_rows(8 * SR as usize), SR, 8).unwrap();
    let result = ArtifactRunner::default().detect(&recording, 20, DetectorKind::Ecg);
    assert!(matches!(result, Err(ArtifactError::ShapeMismatch(_))));
}

#[test]
fn test_lfp_detects_drift_block() {
    let sr = 64;
    let block = 4 * sr as usize;
    let mut rows: Vec<Vec<f64>> = (0..4 * block)
        .map(|i| vec![(2.0 * PI * 10.0 * i as f64 / sr as f64).sin(); 20])
        .collect();
    for row in rows.iter_mut().skip(3 * block) {
        row[7] += 40.0;
    }
    let recording = Recording::from_rows(&rows, sr, 16).unwrap();

    let report = ArtifactRunner::default()
        .detect(&recording, 20, DetectorKind::Lfp)
        .unwrap();
    assert_eq!(report.flags, vec![false, false, false, true]);
    assert!(report.degenerate_blocks.is_empty());
}

#[test]
fn test_degenerate_blocks_reported_once() {
    // 4 Hz with a 1 Hz mains notch: flat blocks have no in-band energy left
    let sr = 4;
    let block = 16;
    let config = DetectionConfig {
        electric_frequency: 1.0,
        ..DetectionConfig::default()
    };

    let rows: Vec<Vec<f64>> = (0..4 * block)
        .map(|i| {
            let wave = 2.0 + (2.0 * PI * 0.3 * i as f64 / sr as f64).sin();
            (0..20)
                .map(|c| {
                    let flat = i / block == 0 || (c == 5 && i / block == 2);
                    if flat {
                        3.0
                    } else {
                        wave
                    }
                })
                .collect()
        })
        .collect();
    let recording = Recording::from_rows(&rows, sr, 16).unwrap();

    let report = ArtifactRunner::new(config)
        .unwrap()
        .detect(&recording, 20, DetectorKind::Lfp)
        .unwrap();
    assert_eq!(report.degenerate_blocks, vec![0, 2]);
    assert!(report.channel_failures.is_empty());
    assert!(!report.flags[0]);
    assert!(!report.flags[2]);
}

#[test]
fn test_single_block_is_insufficient() {
    let recording = Recording::from_rows(&quiet_rows(5 * SR as usize), SR, 5).unwrap();
    let result = ArtifactRunner::default().detect(&recording, 19, DetectorKind::Eep);
    assert!(matches!(
        result,
        Err(ArtifactError::InsufficientData { found: 1, required: 2 })
    ));
}

#[test]
fn test_detect_all_runs_each_detector() {
    let rows: Vec<Vec<f64>> = (0..8 * SR as usize)
        .map(|i| (0..20).map(|c| ((i * (c + 1)) % 13) as f64 - 6.0).collect())
        .collect();
    let recording = Recording::from_rows(&rows, SR, 8).unwrap();

    let reports = ArtifactRunner::default()
        .detect_all(&recording, 19)
        .unwrap();
    let kinds: Vec<DetectorKind> = reports.iter().map(|r| r.detector).collect();
    assert_eq!(
        kinds,
        vec![DetectorKind::Eep, DetectorKind::Ecg, DetectorKind::Lfp]
    );
    assert!(reports.iter().all(|r| r.flags.len() == 2));
}

#[test]
fn test_file_pipeline_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("rec.txt");
    let mut file = std::fs::File::create(&input).unwrap();
    writeln!(file, "# 20 columns, 1 Hz").unwrap();
    for i in 0..160 {
        let v = if i % 2 == 0 { -5.0 } else { 7.0 };
        let mut row = vec![v; 20];
        if i == 101 {
            row[7] = 3e4;
        }
        let line: Vec<String> = row.iter().map(|x| x.to_string()).collect();
        writeln!(file, "{}", line.join(" ")).unwrap();
    }
    drop(file);

    let runner = ArtifactRunner::default();
    let report = runner
        .run_file(&input, 1, None, 20, DetectorKind::Eep)
        .unwrap();
    assert_eq!(report.duration_secs, 160);
    assert_eq!(report.source.as_deref(), input.to_str());

    let output = dir.path().join("result.txt");
    let outcome = write_interval_file(&output, &report.intervals).unwrap();
    assert_eq!(outcome, WriteOutcome::Written(output.clone()));
    assert_eq!(read_interval_file(&output).unwrap(), report.intervals);

    let second = write_interval_file(&output, &[]).unwrap();
    assert_eq!(second, WriteOutcome::AlreadyExists(output.clone()));
    assert_eq!(read_interval_file(&output).unwrap(), report.intervals);
}

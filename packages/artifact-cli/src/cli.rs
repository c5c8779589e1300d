use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "eegart",
    version,
    about = "EEG block artifact detection command-line tool",
    long_about = "Detect EEP, ECG and LFP artifacts in 4-second blocks of multi-channel EEG\n\
                  recordings (ASCII/CSV sample matrices) and write the flagged blocks as a\n\
                  Start/End sample interval table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one detector on a recording
    Run(RunArgs),
    /// Run one detector on many recordings
    Batch(BatchArgs),
    /// List available artifact detectors
    Detectors(DetectorsArgs),
    /// Validate a recording file
    Validate(ValidateArgs),
}

/// Detection options shared by `run` and `batch`
#[derive(Args, Clone)]
pub struct DetectionArgs {
    /// Sampling rate in Hz
    #[arg(long)]
    pub sr: u32,

    /// Number of EEG channels (19: ECG in column 0, or 20)
    #[arg(long, default_value_t = 19)]
    pub eeg_channels: usize,

    /// Reported recording duration in seconds (default: samples / sr)
    #[arg(long)]
    pub duration: Option<u32>,

    /// Detector abbreviation (EEP, ECG, LFP)
    #[arg(long, default_value = "EEP")]
    pub detector: String,

    /// JSON file with detection constants
    #[arg(long, env = "EEGART_CONFIG")]
    pub config: Option<String>,

    /// Low-frequency band edge in Hz (LFP)
    #[arg(long)]
    pub lambda: Option<f64>,

    /// Mains frequency in Hz excluded from the LFP denominator
    #[arg(long)]
    pub mains: Option<f64>,
}

#[derive(Args)]
pub struct RunArgs {
    /// Input recording (ASCII/TXT/CSV sample × channel matrix)
    #[arg(long)]
    pub file: String,

    #[command(flatten)]
    pub detection: DetectionArgs,

    /// Interval table path; never overwritten if it exists
    #[arg(short, long, default_value = artifact_rs::DEFAULT_OUTPUT_FILE)]
    pub output: String,

    /// Also write the full JSON report here ("-" for stdout)
    #[arg(long)]
    pub report: Option<String>,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern selecting input files
    #[arg(long, conflicts_with = "files")]
    pub glob: Option<String>,

    /// Explicit input files
    #[arg(long, num_args = 1..)]
    pub files: Option<Vec<String>>,

    #[command(flatten)]
    pub detection: DetectionArgs,

    /// Directory receiving one `<stem>_<detector>.txt` table per input
    #[arg(long, default_value = ".")]
    pub output_dir: String,

    /// Keep going after a failed file
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,

    /// Only list the files that would be processed
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct DetectorsArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Input recording path
    #[arg(long)]
    pub file: String,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::parse_from(["eegart", "run", "--file", "rec.txt", "--sr", "256"]);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.detection.detector, "EEP");
                assert_eq!(args.detection.eeg_channels, 19);
                assert_eq!(args.output, "result.txt");
                assert!(args.detection.duration.is_none());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_batch_glob_and_files_conflict() {
        let result = Cli::try_parse_from([
            "eegart", "batch", "--sr", "256", "--glob", "*.txt", "--files", "a.txt",
        ]);
        assert!(result.is_err());
    }
}

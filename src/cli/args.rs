//! Command line argument parsing for the Veritas CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Veritas - a news-veracity classification toolkit
#[derive(Parser, Debug, Clone)]
#[command(name = "veritas")]
#[command(about = "Merge news datasets, train a classifier, and serve predictions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct VeritasArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl VeritasArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Merge source CSVs into the master dataset
    Merge(MergeArgs),

    /// Train the classifier from the master dataset
    Train(TrainArgs),

    /// Classify a single text from the console
    Predict(PredictArgs),

    /// Serve the web form
    Serve(ServeArgs),
}

/// Arguments for merging source datasets
#[derive(Parser, Debug, Clone)]
pub struct MergeArgs {
    /// Merge configuration file (JSON); defaults to the built-in source list
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the source CSVs (used with the built-in list)
    #[arg(short, long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Output path for the master dataset
    #[arg(short, long, default_value = "master_dataset.csv")]
    pub output: PathBuf,
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Master dataset produced by `merge`
    #[arg(short, long, default_value = "master_dataset.csv")]
    pub dataset: PathBuf,

    /// Directory receiving the model artifacts and reports
    #[arg(short, long, default_value = "model")]
    pub model_dir: PathBuf,

    /// Held-out fraction for evaluation
    #[arg(long, default_value = "0.2")]
    pub test_ratio: f64,

    /// Random seed for the train/test split
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Skip writing the report images
    #[arg(long)]
    pub no_reports: bool,
}

/// Arguments for console prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Directory holding the trained artifacts
    #[arg(short, long, default_value = "model")]
    pub model_dir: PathBuf,

    /// Optional knowledge-base rule file (JSON) replacing the built-in table
    #[arg(short, long, value_name = "RULES_FILE")]
    pub knowledge: Option<PathBuf>,

    /// Text to classify
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for the web server
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Directory holding the trained artifacts
    #[arg(short, long, default_value = "model")]
    pub model_dir: PathBuf,

    /// Listen address
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    pub addr: String,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_merge_command() {
        let args = VeritasArgs::try_parse_from([
            "veritas",
            "merge",
            "--data-dir",
            "/data",
            "--output",
            "/tmp/master.csv",
        ])
        .unwrap();

        if let Command::Merge(merge_args) = args.command {
            assert_eq!(merge_args.data_dir, PathBuf::from("/data"));
            assert_eq!(merge_args.output, PathBuf::from("/tmp/master.csv"));
            assert!(merge_args.config.is_none());
        } else {
            panic!("Expected Merge command");
        }
    }

    #[test]
    fn test_train_command_defaults() {
        let args = VeritasArgs::try_parse_from(["veritas", "train"]).unwrap();

        if let Command::Train(train_args) = args.command {
            assert_eq!(train_args.dataset, PathBuf::from("master_dataset.csv"));
            assert_eq!(train_args.model_dir, PathBuf::from("model"));
            assert_eq!(train_args.test_ratio, 0.2);
            assert_eq!(train_args.seed, 42);
            assert!(!train_args.no_reports);
        } else {
            panic!("Expected Train command");
        }
    }

    #[test]
    fn test_predict_command() {
        let args = VeritasArgs::try_parse_from([
            "veritas",
            "predict",
            "--model-dir",
            "/models/news",
            "some breaking headline",
        ])
        .unwrap();

        if let Command::Predict(predict_args) = args.command {
            assert_eq!(predict_args.model_dir, PathBuf::from("/models/news"));
            assert_eq!(predict_args.text, "some breaking headline");
        } else {
            panic!("Expected Predict command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = VeritasArgs::try_parse_from(["veritas", "train"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = VeritasArgs::try_parse_from(["veritas", "-vv", "train"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = VeritasArgs::try_parse_from(["veritas", "--quiet", "train"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            VeritasArgs::try_parse_from(["veritas", "--format", "json", "train"]).unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
    }
}

//! Command line argument parsing for the scamshield CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// scamshield - advance-fee fraud text classifier
#[derive(Parser, Debug, Clone)]
#[command(name = "scamshield")]
#[command(about = "Detect advance-fee fraud in emails, SMS, and job postings")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ScamShieldArgs {
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

impl ScamShieldArgs {
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
    /// Parse the raw dataset sources into a cleaned corpus
    Ingest(IngestArgs),

    /// Train and persist the model from a cleaned corpus
    Train(TrainArgs),

    /// Classify a text (or start an interactive session)
    Predict(PredictArgs),

    /// Serve predictions over HTTP
    Serve(ServeArgs),
}

/// Arguments for dataset ingestion
#[derive(Parser, Debug, Clone)]
pub struct IngestArgs {
    /// Classic AFF mailbox dump (text blob with "From r" record markers)
    #[arg(long, value_name = "FILE")]
    pub mailbox: Option<PathBuf>,

    /// Legitimate email CSV
    #[arg(long, value_name = "FILE")]
    pub ham: Option<PathBuf>,

    /// SMS spam CSV (lottery/prize scams)
    #[arg(long, value_name = "FILE")]
    pub sms: Option<PathBuf>,

    /// Fake job postings CSV
    #[arg(long, value_name = "FILE")]
    pub jobs: Option<PathBuf>,

    /// Where to write the cleaned corpus
    #[arg(short, long, default_value = "data/processed/clean_dataset.csv")]
    pub output: PathBuf,

    /// Drop documents whose cleaned text is at or below this length
    #[arg(long, default_value = "10")]
    pub min_clean_len: usize,
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Cleaned corpus CSV produced by the ingest command
    #[arg(short, long, default_value = "data/processed/clean_dataset.csv")]
    pub corpus: PathBuf,

    /// Directory for the model artifacts
    #[arg(short, long, default_value = "models")]
    pub model_dir: PathBuf,

    /// Maximum vocabulary size
    #[arg(long, default_value = "5000")]
    pub max_features: usize,

    /// Laplace smoothing constant
    #[arg(long, default_value = "1.0")]
    pub alpha: f64,

    /// Cross-validation fold count (0 disables CV)
    #[arg(long, default_value = "5")]
    pub folds: usize,

    /// Held-out fraction for the evaluation split
    #[arg(long, default_value = "0.2")]
    pub test_fraction: f64,

    /// Shuffle seed for reproducible splits
    #[arg(long, default_value = "42")]
    pub seed: u64,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Text to classify; omit to start an interactive session
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Directory holding the model artifacts
    #[arg(short, long, default_value = "models")]
    pub model_dir: PathBuf,
}

/// Arguments for the HTTP server
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(short, long, default_value = "127.0.0.1:8000")]
    pub addr: String,

    /// Directory holding the model artifacts
    #[arg(short, long, default_value = "models")]
    pub model_dir: PathBuf,
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
    fn test_predict_command() {
        let args = ScamShieldArgs::try_parse_from([
            "scamshield",
            "predict",
            "you have won a prize",
            "--model-dir",
            "/tmp/models",
        ])
        .unwrap();

        if let Command::Predict(predict_args) = args.command {
            assert_eq!(predict_args.text.as_deref(), Some("you have won a prize"));
            assert_eq!(predict_args.model_dir, PathBuf::from("/tmp/models"));
        } else {
            panic!("Expected Predict command");
        }
    }

    #[test]
    fn test_predict_without_text_is_interactive() {
        let args = ScamShieldArgs::try_parse_from(["scamshield", "predict"]).unwrap();
        if let Command::Predict(predict_args) = args.command {
            assert!(predict_args.text.is_none());
        } else {
            panic!("Expected Predict command");
        }
    }

    #[test]
    fn test_train_command_defaults() {
        let args = ScamShieldArgs::try_parse_from(["scamshield", "train"]).unwrap();

        if let Command::Train(train_args) = args.command {
            assert_eq!(train_args.max_features, 5000);
            assert_eq!(train_args.folds, 5);
            assert_eq!(train_args.seed, 42);
            assert!((train_args.test_fraction - 0.2).abs() < 1e-12);
        } else {
            panic!("Expected Train command");
        }
    }

    #[test]
    fn test_ingest_command_sources() {
        let args = ScamShieldArgs::try_parse_from([
            "scamshield",
            "ingest",
            "--mailbox",
            "data/raw/fraud_emails.txt",
            "--ham",
            "data/raw/spam_ham_dataset.csv",
            "--output",
            "/tmp/clean.csv",
        ])
        .unwrap();

        if let Command::Ingest(ingest_args) = args.command {
            assert!(ingest_args.mailbox.is_some());
            assert!(ingest_args.ham.is_some());
            assert!(ingest_args.sms.is_none());
            assert_eq!(ingest_args.output, PathBuf::from("/tmp/clean.csv"));
        } else {
            panic!("Expected Ingest command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = ScamShieldArgs::try_parse_from(["scamshield", "predict", "x"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = ScamShieldArgs::try_parse_from(["scamshield", "-vv", "predict", "x"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args =
            ScamShieldArgs::try_parse_from(["scamshield", "--quiet", "predict", "x"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            ScamShieldArgs::try_parse_from(["scamshield", "--format", "json", "train"]).unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
    }
}

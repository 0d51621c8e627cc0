//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, ScamShieldArgs};
use crate::error::Result;
use crate::metrics::{ClassificationMetrics, ConfusionMatrix};

/// Result structure for the ingest command.
#[derive(Debug, Serialize, Deserialize)]
pub struct IngestionResult {
    pub documents: usize,
    pub fraud: usize,
    pub legitimate: usize,
    pub dropped_short: usize,
    pub output_path: String,
}

/// Result structure for the train command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub documents: usize,
    pub vocabulary_size: usize,
    pub cv_fold_accuracies: Vec<f64>,
    pub cv_mean: ClassificationMetrics,
    pub holdout: ClassificationMetrics,
    pub confusion: ConfusionMatrix,
}

/// Result structure for one-shot prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: String,
    pub confidence: f64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &ScamShieldArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &ScamShieldArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    print_value("", &value);
    Ok(())
}

/// Recursively print a JSON value as indented key/value lines.
fn print_value(indent: &str, value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                match val {
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        println!("{indent}{key}:");
                        print_value(&format!("{indent}  "), val);
                    }
                    _ => println!("{indent}{key}: {}", format_scalar(val)),
                }
            }
        }
        serde_json::Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                match item {
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        println!("{indent}[{i}]:");
                        print_value(&format!("{indent}  "), item);
                    }
                    _ => println!("{indent}[{i}]: {}", format_scalar(item)),
                }
            }
        }
        _ => println!("{indent}{}", format_scalar(value)),
    }
}

fn format_scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{f}")
                } else {
                    format!("{f:.4}")
                }
            } else {
                n.to_string()
            }
        }
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &ScamShieldArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

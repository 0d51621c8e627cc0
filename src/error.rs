//! Error types for the scamshield library.
//!
//! All fallible operations return [`Result`], with failures represented by
//! the [`AffError`] enum.
//!
//! # Examples
//!
//! ```
//! use scamshield::error::{AffError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(AffError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for scamshield operations.
///
/// Uses the `thiserror` crate for the `Error` trait implementation and
/// provides convenient constructor methods for the common cases.
#[derive(Error, Debug)]
pub enum AffError {
    /// I/O errors (dataset files, model artifacts).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Text analysis errors (normalization, tokenization).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Vectorizer used before `fit` was called.
    #[error("Vectorizer is not fitted: {0}")]
    NotFitted(String),

    /// Dataset ingestion errors (malformed rows, unusable columns).
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Training errors (empty corpus, label/vector length mismatch).
    #[error("Training error: {0}")]
    Training(String),

    /// Model artifacts missing or unreadable at inference time.
    #[error("Model not trained: {0}")]
    NotTrained(String),

    /// Artifact format errors (bad magic, unknown version, mismatched pair).
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Serialization errors from the bincode artifact codec.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing errors.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`AffError`].
pub type Result<T> = std::result::Result<T, AffError>;

impl AffError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        AffError::Analysis(msg.into())
    }

    /// Create a new not-fitted error.
    pub fn not_fitted<S: Into<String>>(msg: S) -> Self {
        AffError::NotFitted(msg.into())
    }

    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        AffError::Dataset(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        AffError::Training(msg.into())
    }

    /// Create a new not-trained error.
    pub fn not_trained<S: Into<String>>(msg: S) -> Self {
        AffError::NotTrained(msg.into())
    }

    /// Create a new artifact error.
    pub fn artifact<S: Into<String>>(msg: S) -> Self {
        AffError::Artifact(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        AffError::Serialization(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        AffError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        AffError::Other(msg.into())
    }
}

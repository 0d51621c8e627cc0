//! Pipeline orchestration: training, artifact persistence, and inference.
//!
//! [`trainer::Trainer`] fits the vectorizer/classifier pair and persists it;
//! [`predictor::Predictor`] loads the pair read-only and serves predictions.
//! Both take an explicit [`config::PipelineConfig`] rather than reading
//! global path constants.

pub mod artifact;
pub mod config;
pub mod predictor;
pub mod trainer;

pub use config::PipelineConfig;
pub use predictor::{Prediction, Predictor};
pub use trainer::{TrainReport, Trainer};

//! Pipeline configuration.

use std::path::{Path, PathBuf};

use crate::classifier::naive_bayes::DEFAULT_ALPHA;
use crate::feature::vectorizer::DEFAULT_MAX_FEATURES;
use crate::model_selection::DEFAULT_SEED;

/// Explicit configuration passed to the trainer and predictor.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Directory holding the persisted model artifacts.
    pub model_dir: PathBuf,
    /// Upper bound on vocabulary size.
    pub max_features: usize,
    /// Laplace smoothing constant.
    pub alpha: f64,
    /// Documents with cleaned text at or below this length are dropped.
    pub min_clean_len: usize,
    /// Held-out fraction for the evaluation split.
    pub test_fraction: f64,
    /// Cross-validation fold count; below 2 disables the CV phase.
    pub cv_folds: usize,
    /// Shuffle seed for splits.
    pub seed: u64,
}

impl PipelineConfig {
    /// Create a configuration with default tuning and the given model
    /// directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        PipelineConfig {
            model_dir: model_dir.into(),
            max_features: DEFAULT_MAX_FEATURES,
            alpha: DEFAULT_ALPHA,
            min_clean_len: 10,
            test_fraction: 0.2,
            cv_folds: 5,
            seed: DEFAULT_SEED,
        }
    }

    /// Set the vocabulary size bound.
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Set the smoothing constant.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the cross-validation fold count (below 2 disables CV).
    pub fn with_cv_folds(mut self, cv_folds: usize) -> Self {
        self.cv_folds = cv_folds;
        self
    }

    /// Set the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Path of the persisted vectorizer artifact.
    pub fn vectorizer_path(&self) -> PathBuf {
        self.model_dir.join("vectorizer.bin")
    }

    /// Path of the persisted classifier artifact.
    pub fn classifier_path(&self) -> PathBuf {
        self.model_dir.join("classifier.bin")
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(Path::new("models"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths() {
        let config = PipelineConfig::new("/tmp/aff-models");
        assert_eq!(
            config.vectorizer_path(),
            PathBuf::from("/tmp/aff-models/vectorizer.bin")
        );
        assert_eq!(
            config.classifier_path(),
            PathBuf::from("/tmp/aff-models/classifier.bin")
        );
    }

    #[test]
    fn test_builder_overrides() {
        let config = PipelineConfig::default()
            .with_max_features(100)
            .with_alpha(0.5)
            .with_cv_folds(3)
            .with_seed(7);
        assert_eq!(config.max_features, 100);
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.cv_folds, 3);
        assert_eq!(config.seed, 7);
    }
}

//! Training orchestration.
//!
//! Three phases, mirroring how the model is validated before it ships:
//!
//! 1. stratified k-fold cross-validation as a robustness check,
//! 2. an 80/20 stratified holdout evaluation (metrics + confusion matrix),
//! 3. a final fit on 100% of the data, persisted as the production pair.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::MultinomialNb;
use crate::dataset::CleanDocument;
use crate::error::{AffError, Result};
use crate::feature::CountVectorizer;
use crate::metrics::{ClassificationMetrics, ConfusionMatrix};
use crate::model_selection::{Split, StratifiedKFold, train_test_split};

use super::artifact;
use super::config::PipelineConfig;

/// Everything the trainer learned about the model before persisting it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainReport {
    pub documents: usize,
    pub fraud_documents: usize,
    pub legitimate_documents: usize,
    pub vocabulary_size: usize,
    /// Per-fold CV metrics; empty when CV was disabled.
    pub cv_folds: Vec<ClassificationMetrics>,
    /// Mean of `cv_folds`.
    pub cv_mean: ClassificationMetrics,
    /// Holdout evaluation metrics.
    pub holdout: ClassificationMetrics,
    /// Holdout confusion matrix.
    pub confusion: ConfusionMatrix,
}

/// Fits and persists the vectorizer/classifier pair.
pub struct Trainer {
    config: PipelineConfig,
}

impl Trainer {
    /// Create a trainer with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Trainer { config }
    }

    /// Train on a cleaned corpus, evaluate, and persist the final model.
    pub fn train(&self, documents: &[CleanDocument]) -> Result<TrainReport> {
        if documents.is_empty() {
            return Err(AffError::training("no documents to train on"));
        }

        let texts: Vec<String> = documents.iter().map(|d| d.clean_text.clone()).collect();
        let labels: Vec<usize> = documents.iter().map(|d| d.label.as_usize()).collect();

        let fraud_documents = labels.iter().filter(|&&l| l == 1).count();
        let legitimate_documents = labels.len() - fraud_documents;
        if fraud_documents == 0 || legitimate_documents == 0 {
            return Err(AffError::training(
                "corpus must contain both fraud and legitimate documents",
            ));
        }

        info!(
            documents = documents.len(),
            fraud = fraud_documents,
            legitimate = legitimate_documents,
            "fitting vocabulary"
        );

        let mut vectorizer =
            CountVectorizer::new()?.with_max_features(self.config.max_features);
        vectorizer.fit(&texts)?;
        let vectors = vectorizer.transform_batch(&texts)?;
        let vocabulary_size = vectorizer.vocabulary_size();

        // Phase 1: cross-validation robustness check.
        let cv_folds = if self.config.cv_folds >= 2 {
            let splitter =
                StratifiedKFold::new(self.config.cv_folds).with_seed(self.config.seed);
            let mut fold_metrics = Vec::with_capacity(self.config.cv_folds);
            for (fold, split) in splitter.split(&labels)?.iter().enumerate() {
                let metrics = self.evaluate_split(&vectors, &labels, split)?.0;
                info!(fold = fold + 1, accuracy = metrics.accuracy, "CV fold");
                fold_metrics.push(metrics);
            }
            fold_metrics
        } else {
            Vec::new()
        };
        let cv_mean = ClassificationMetrics::mean(&cv_folds);

        // Phase 2: holdout evaluation.
        let holdout_split =
            train_test_split(&labels, self.config.test_fraction, self.config.seed)?;
        let (holdout, confusion) = self.evaluate_split(&vectors, &labels, &holdout_split)?;
        info!(
            accuracy = holdout.accuracy,
            f1 = holdout.f1,
            "holdout evaluation"
        );

        // Phase 3: final fit on everything, then persist.
        let model = MultinomialNb::fit_with_alpha(&vectors, &labels, self.config.alpha)?;
        let vocabulary = vectorizer
            .vocabulary()
            .ok_or_else(|| AffError::not_fitted("vectorizer lost its vocabulary"))?;
        artifact::save_pair(&self.config, vocabulary, &model)?;
        info!(
            model_dir = %self.config.model_dir.display(),
            vocabulary_size,
            "model artifacts saved"
        );

        Ok(TrainReport {
            documents: documents.len(),
            fraud_documents,
            legitimate_documents,
            vocabulary_size,
            cv_folds,
            cv_mean,
            holdout,
            confusion,
        })
    }

    /// Fit on the train side of a split and evaluate on the test side.
    fn evaluate_split(
        &self,
        vectors: &[Vec<u32>],
        labels: &[usize],
        split: &Split,
    ) -> Result<(ClassificationMetrics, ConfusionMatrix)> {
        let train_vectors: Vec<Vec<u32>> =
            split.train.iter().map(|&i| vectors[i].clone()).collect();
        let train_labels: Vec<usize> = split.train.iter().map(|&i| labels[i]).collect();

        let model = MultinomialNb::fit_with_alpha(&train_vectors, &train_labels, self.config.alpha)?;

        let expected: Vec<usize> = split.test.iter().map(|&i| labels[i]).collect();
        let predicted: Vec<usize> = split
            .test
            .iter()
            .map(|&i| model.predict(&vectors[i]))
            .collect::<Result<_>>()?;

        let confusion = ConfusionMatrix::from_predictions(&expected, &predicted);
        Ok((ClassificationMetrics::from_confusion(&confusion), confusion))
    }
}

//! Inference over a loaded vectorizer/classifier pair.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::TextNormalizer;
use crate::classifier::MultinomialNb;
use crate::dataset::Label;
use crate::error::{AffError, Result};
use crate::feature::{CountVectorizer, Vocabulary};

use super::artifact;
use super::config::PipelineConfig;

/// A single classification result.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Prediction {
    pub label: Label,
    /// Probability of the winning label, in `[0, 1]`.
    pub confidence: f64,
}

/// Read-only inference handle over a matched vectorizer/classifier pair.
///
/// Nothing is mutated after construction, so a `Predictor` can be shared
/// across concurrent request handlers behind an `Arc` without locking.
#[derive(Debug)]
pub struct Predictor {
    normalizer: TextNormalizer,
    vectorizer: CountVectorizer,
    model: MultinomialNb,
}

impl Predictor {
    /// Load the persisted artifact pair.
    ///
    /// Fails fast with [`AffError::NotTrained`] when the artifacts are
    /// missing; the caller decides how to surface that.
    pub fn load(config: &PipelineConfig) -> Result<Self> {
        let (vocabulary, model) = artifact::load_pair(config)?;
        info!(
            vocabulary_size = vocabulary.len(),
            model_dir = %config.model_dir.display(),
            "model loaded"
        );
        Self::from_parts(vocabulary, model)
    }

    /// Build a predictor from an in-memory pair (used by training-time
    /// smoke checks and tests).
    pub fn from_parts(vocabulary: Vocabulary, model: MultinomialNb) -> Result<Self> {
        if vocabulary.len() != model.n_features() {
            return Err(AffError::artifact(format!(
                "vectorizer/classifier mismatch: {} terms vs {} features",
                vocabulary.len(),
                model.n_features()
            )));
        }

        Ok(Predictor {
            normalizer: TextNormalizer::new()?,
            vectorizer: CountVectorizer::from_vocabulary(vocabulary)?,
            model,
        })
    }

    /// Classify one raw text: normalize, vectorize, predict.
    ///
    /// Out-of-vocabulary input is not an error; the result then follows the
    /// class priors.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let cleaned = self.normalizer.normalize(text);
        let vector = self.vectorizer.transform(&cleaned)?;

        let probabilities = self.model.predict_proba(&vector)?;
        let (winner, confidence) = probabilities
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).expect("probabilities are finite"))
            .map(|(i, &p)| (i, p))
            .ok_or_else(|| AffError::training("model has no classes"))?;

        Ok(Prediction {
            label: Label::from_usize(self.model.classes()[winner]),
            confidence,
        })
    }

    /// Size of the loaded vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted_predictor() -> Predictor {
        // vocabulary: index 0 fraud-skewed, index 1 legit-skewed.
        let vocabulary =
            Vocabulary::from_terms(vec!["urgent".to_string(), "meeting".to_string()]);
        let vectors = vec![vec![3, 0], vec![2, 0], vec![0, 3], vec![0, 2]];
        let labels = vec![1, 1, 0, 0];
        let model = MultinomialNb::fit(&vectors, &labels).unwrap();
        Predictor::from_parts(vocabulary, model).unwrap()
    }

    #[test]
    fn test_predict_normalizes_and_classifies() {
        let predictor = fitted_predictor();

        let prediction = predictor.predict("URGENT! Urgent reply needed!!").unwrap();
        assert_eq!(prediction.label, Label::Fraud);
        assert!(prediction.confidence > 0.5);

        let prediction = predictor.predict("Meeting notes").unwrap();
        assert_eq!(prediction.label, Label::Legitimate);
    }

    #[test]
    fn test_oov_text_follows_prior() {
        let predictor = fitted_predictor();
        // Balanced priors, unknown words: confidence collapses to 0.5.
        let prediction = predictor.predict("zebra quantum entanglement").unwrap();
        assert!((prediction.confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_mismatched_parts_rejected() {
        let vocabulary = Vocabulary::from_terms(vec!["one".to_string()]);
        let model = MultinomialNb::fit(&[vec![1, 0], vec![0, 1]], &[1, 0]).unwrap();
        assert!(Predictor::from_parts(vocabulary, model).is_err());
    }

    #[test]
    fn test_load_without_artifacts_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::new(dir.path().join("missing"));
        let err = Predictor::load(&config).unwrap_err();
        assert!(matches!(err, AffError::NotTrained(_)));
    }
}

//! Multinomial Naive Bayes classifier.
//!
//! Fits Laplace-smoothed per-class token likelihoods and class priors from
//! count vectors, then classifies by maximum joint log-probability:
//!
//! ```text
//! score(c) = ln P(c) + Σ_f count(f) · ln P(f | c)
//! ```
//!
//! Probabilities are recovered from the joint scores with the log-sum-exp
//! trick so long documents with very negative scores do not underflow to
//! `0/0` during normalization.

use serde::{Deserialize, Serialize};

use crate::error::{AffError, Result};

/// Default Laplace smoothing constant.
pub const DEFAULT_ALPHA: f64 = 1.0;

/// A fitted multinomial Naive Bayes model.
///
/// The parameter tables are created once by [`MultinomialNb::fit`] and never
/// mutated afterwards, so a loaded model is safe to share read-only across
/// request handlers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultinomialNb {
    /// Smoothing constant used at fit time.
    alpha: f64,
    /// Observed class labels, ascending.
    classes: Vec<usize>,
    /// ln(class_count / total_count), aligned with `classes`.
    class_log_prior: Vec<f64>,
    /// ln P(feature | class), `[class][feature]`, aligned with `classes`.
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fit a model with the default smoothing constant.
    pub fn fit(vectors: &[Vec<u32>], labels: &[usize]) -> Result<Self> {
        Self::fit_with_alpha(vectors, labels, DEFAULT_ALPHA)
    }

    /// Fit a model with an explicit Laplace smoothing constant.
    pub fn fit_with_alpha(vectors: &[Vec<u32>], labels: &[usize], alpha: f64) -> Result<Self> {
        if vectors.is_empty() {
            return Err(AffError::training("cannot fit on an empty corpus"));
        }
        if vectors.len() != labels.len() {
            return Err(AffError::training(format!(
                "{} vectors but {} labels",
                vectors.len(),
                labels.len()
            )));
        }
        if alpha <= 0.0 {
            return Err(AffError::training("smoothing alpha must be positive"));
        }

        let n_features = vectors[0].len();
        if vectors.iter().any(|v| v.len() != n_features) {
            return Err(AffError::training("inconsistent feature vector lengths"));
        }

        let mut classes: Vec<usize> = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();

        let class_index = |label: usize| classes.binary_search(&label).unwrap();

        // Per-class document counts and per-class per-feature token counts.
        let mut doc_counts = vec![0u64; classes.len()];
        let mut token_counts = vec![vec![0u64; n_features]; classes.len()];

        for (vector, &label) in vectors.iter().zip(labels) {
            let c = class_index(label);
            doc_counts[c] += 1;
            for (f, &count) in vector.iter().enumerate() {
                token_counts[c][f] += u64::from(count);
            }
        }

        let total = vectors.len() as f64;
        let class_log_prior = doc_counts
            .iter()
            .map(|&n| (n as f64 / total).ln())
            .collect();

        let feature_log_prob = token_counts
            .iter()
            .map(|counts| {
                let class_total: u64 = counts.iter().sum();
                let denominator = class_total as f64 + alpha * n_features as f64;
                counts
                    .iter()
                    .map(|&c| ((c as f64 + alpha) / denominator).ln())
                    .collect()
            })
            .collect();

        Ok(MultinomialNb {
            alpha,
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Predict the label with the highest joint log-probability.
    pub fn predict(&self, vector: &[u32]) -> Result<usize> {
        let scores = self.joint_log_likelihood(vector)?;
        let best = scores
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).expect("scores are finite"))
            .map(|(i, _)| i)
            .ok_or_else(|| AffError::training("model has no classes"))?;

        Ok(self.classes[best])
    }

    /// Per-class probabilities, aligned with [`MultinomialNb::classes`].
    ///
    /// The output sums to 1.0 within floating-point tolerance. An all-zero
    /// vector yields the class priors.
    pub fn predict_proba(&self, vector: &[u32]) -> Result<Vec<f64>> {
        let scores = self.joint_log_likelihood(vector)?;

        // log-sum-exp normalization keeps very negative scores finite.
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = scores.iter().map(|&s| (s - max).exp()).collect();
        let sum: f64 = exp.iter().sum();

        Ok(exp.into_iter().map(|e| e / sum).collect())
    }

    /// Joint log-probability per class: prior + Σ count · log-likelihood.
    pub fn joint_log_likelihood(&self, vector: &[u32]) -> Result<Vec<f64>> {
        let n_features = self.n_features();
        if vector.len() != n_features {
            return Err(AffError::invalid_argument(format!(
                "expected {} features, got {}",
                n_features,
                vector.len()
            )));
        }

        Ok(self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(&prior, log_prob)| {
                prior
                    + vector
                        .iter()
                        .zip(log_prob)
                        .filter(|&(&count, _)| count > 0)
                        .map(|(&count, &lp)| f64::from(count) * lp)
                        .sum::<f64>()
            })
            .collect())
    }

    /// Observed class labels, ascending.
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    /// Number of features the model was fitted on.
    pub fn n_features(&self) -> usize {
        self.feature_log_prob.first().map_or(0, |row| row.len())
    }

    /// The smoothing constant used at fit time.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

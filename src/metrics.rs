//! Binary classification metrics for training-time evaluation.
//!
//! All metrics treat label `1` (fraud) as the positive class, matching how
//! the trainer reports holdout and cross-validation results.

use serde::{Deserialize, Serialize};

/// A 2x2 confusion matrix for binary labels.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: u64,
    pub false_positives: u64,
    pub true_negatives: u64,
    pub false_negatives: u64,
}

impl ConfusionMatrix {
    /// Tally predictions against expected labels.
    pub fn from_predictions(expected: &[usize], predicted: &[usize]) -> Self {
        let mut matrix = ConfusionMatrix::default();
        for (&truth, &guess) in expected.iter().zip(predicted) {
            match (truth, guess) {
                (1, 1) => matrix.true_positives += 1,
                (0, 1) => matrix.false_positives += 1,
                (0, 0) => matrix.true_negatives += 1,
                (1, 0) => matrix.false_negatives += 1,
                _ => {}
            }
        }
        matrix
    }

    /// Total number of tallied predictions.
    pub fn total(&self) -> u64 {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }
}

/// Accuracy, precision, recall, and F1 for the positive class.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl ClassificationMetrics {
    /// Compute all metrics from a confusion matrix.
    ///
    /// Degenerate denominators (no predicted positives, no actual positives)
    /// yield 0.0 rather than NaN.
    pub fn from_confusion(matrix: &ConfusionMatrix) -> Self {
        let tp = matrix.true_positives as f64;
        let fp = matrix.false_positives as f64;
        let fn_ = matrix.false_negatives as f64;
        let total = matrix.total() as f64;

        let accuracy = if total > 0.0 {
            (tp + matrix.true_negatives as f64) / total
        } else {
            0.0
        };
        let precision = if tp + fp > 0.0 { tp / (tp + fp) } else { 0.0 };
        let recall = if tp + fn_ > 0.0 { tp / (tp + fn_) } else { 0.0 };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        ClassificationMetrics {
            accuracy,
            precision,
            recall,
            f1,
        }
    }

    /// Compute all metrics directly from label slices.
    pub fn from_predictions(expected: &[usize], predicted: &[usize]) -> Self {
        Self::from_confusion(&ConfusionMatrix::from_predictions(expected, predicted))
    }

    /// Element-wise mean of several metric sets (used for CV averaging).
    pub fn mean(all: &[ClassificationMetrics]) -> Self {
        if all.is_empty() {
            return ClassificationMetrics::default();
        }
        let n = all.len() as f64;
        ClassificationMetrics {
            accuracy: all.iter().map(|m| m.accuracy).sum::<f64>() / n,
            precision: all.iter().map(|m| m.precision).sum::<f64>() / n,
            recall: all.iter().map(|m| m.recall).sum::<f64>() / n,
            f1: all.iter().map(|m| m.f1).sum::<f64>() / n,
        }
    }
}

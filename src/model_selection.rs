//! Stratified dataset splitting for evaluation.
//!
//! Both the holdout split and the k-fold splitter preserve label proportions
//! and shuffle with a seeded [`StdRng`], so a given seed always produces the
//! same partition.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{AffError, Result};

/// Default shuffle seed for reproducible experiments.
pub const DEFAULT_SEED: u64 = 42;

/// Index sets produced by a holdout split or by one CV fold.
#[derive(Clone, Debug)]
pub struct Split {
    /// Indices of training documents.
    pub train: Vec<usize>,
    /// Indices of held-out documents.
    pub test: Vec<usize>,
}

/// Group document indices by label, in ascending label order.
fn by_class(labels: &[usize]) -> Vec<(usize, Vec<usize>)> {
    let mut classes: Vec<usize> = labels.to_vec();
    classes.sort_unstable();
    classes.dedup();

    classes
        .into_iter()
        .map(|class| {
            let indices = labels
                .iter()
                .enumerate()
                .filter(|&(_, &l)| l == class)
                .map(|(i, _)| i)
                .collect();
            (class, indices)
        })
        .collect()
}

/// Stratified holdout split.
///
/// Each class contributes `test_fraction` of its documents (rounded, at
/// least one when the class has two or more members) to the test set.
pub fn train_test_split(labels: &[usize], test_fraction: f64, seed: u64) -> Result<Split> {
    if labels.is_empty() {
        return Err(AffError::training("cannot split an empty dataset"));
    }
    if !(0.0..1.0).contains(&test_fraction) || test_fraction == 0.0 {
        return Err(AffError::training(format!(
            "test fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut split = Split {
        train: Vec::new(),
        test: Vec::new(),
    };

    for (_, mut indices) in by_class(labels) {
        indices.shuffle(&mut rng);

        let mut n_test = (indices.len() as f64 * test_fraction).round() as usize;
        if indices.len() >= 2 {
            n_test = n_test.clamp(1, indices.len() - 1);
        }

        split.test.extend(indices.drain(..n_test));
        split.train.extend(indices);
    }

    split.train.sort_unstable();
    split.test.sort_unstable();
    Ok(split)
}

/// Stratified k-fold splitter.
#[derive(Clone, Debug)]
pub struct StratifiedKFold {
    n_splits: usize,
    seed: u64,
}

impl StratifiedKFold {
    /// Create a splitter with the given fold count and the default seed.
    pub fn new(n_splits: usize) -> Self {
        StratifiedKFold {
            n_splits,
            seed: DEFAULT_SEED,
        }
    }

    /// Override the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of folds.
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Produce `n_splits` train/test partitions preserving label
    /// proportions. Every class must have at least `n_splits` members.
    pub fn split(&self, labels: &[usize]) -> Result<Vec<Split>> {
        if self.n_splits < 2 {
            return Err(AffError::training("k-fold requires at least 2 splits"));
        }

        let grouped = by_class(labels);
        for (class, indices) in &grouped {
            if indices.len() < self.n_splits {
                return Err(AffError::training(format!(
                    "class {class} has {} members, fewer than {} folds",
                    indices.len(),
                    self.n_splits
                )));
            }
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut fold_tests: Vec<Vec<usize>> = vec![Vec::new(); self.n_splits];

        // Round-robin each shuffled class across folds so label proportions
        // stay balanced per fold.
        for (_, mut indices) in grouped {
            indices.shuffle(&mut rng);
            for (i, index) in indices.into_iter().enumerate() {
                fold_tests[i % self.n_splits].push(index);
            }
        }

        let folds = fold_tests
            .iter()
            .map(|test| {
                let train = (0..labels.len())
                    .filter(|i| !test.contains(i))
                    .collect::<Vec<_>>();
                let mut test = test.clone();
                test.sort_unstable();
                Split { train, test }
            })
            .collect();

        Ok(folds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<usize> {
        // 8 fraud, 12 legitimate.
        let mut labels = vec![1; 8];
        labels.extend(vec![0; 12]);
        labels
    }

    #[test]
    fn test_split_is_stratified() {
        let labels = labels();
        let split = train_test_split(&labels, 0.25, DEFAULT_SEED).unwrap();

        assert_eq!(split.train.len() + split.test.len(), labels.len());
        let test_fraud = split.test.iter().filter(|&&i| labels[i] == 1).count();
        let test_legit = split.test.iter().filter(|&&i| labels[i] == 0).count();
        assert_eq!(test_fraud, 2);
        assert_eq!(test_legit, 3);
    }

    #[test]
    fn test_split_is_deterministic() {
        let labels = labels();
        let a = train_test_split(&labels, 0.2, 7).unwrap();
        let b = train_test_split(&labels, 0.2, 7).unwrap();
        assert_eq!(a.test, b.test);
        assert_eq!(a.train, b.train);
    }

    #[test]
    fn test_split_rejects_bad_fraction() {
        assert!(train_test_split(&labels(), 0.0, 0).is_err());
        assert!(train_test_split(&labels(), 1.0, 0).is_err());
        assert!(train_test_split(&[], 0.2, 0).is_err());
    }

    #[test]
    fn test_kfold_partitions_everything() {
        let labels = labels();
        let folds = StratifiedKFold::new(4).split(&labels).unwrap();

        assert_eq!(folds.len(), 4);
        let mut seen: Vec<usize> = folds.iter().flat_map(|f| f.test.clone()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..labels.len()).collect::<Vec<_>>());

        for fold in &folds {
            assert_eq!(fold.train.len() + fold.test.len(), labels.len());
            // Every fold keeps both classes in its test set.
            assert!(fold.test.iter().any(|&i| labels[i] == 1));
            assert!(fold.test.iter().any(|&i| labels[i] == 0));
        }
    }

    #[test]
    fn test_kfold_rejects_small_classes() {
        let labels = vec![1, 1, 0, 0, 0, 0, 0];
        assert!(StratifiedKFold::new(3).split(&labels).is_err());
    }

    #[test]
    fn test_kfold_deterministic_for_seed() {
        let labels = labels();
        let a = StratifiedKFold::new(5).with_seed(9).split(&labels).unwrap();
        let b = StratifiedKFold::new(5).with_seed(9).split(&labels).unwrap();
        for (fa, fb) in a.iter().zip(&b) {
            assert_eq!(fa.test, fb.test);
        }
    }
}

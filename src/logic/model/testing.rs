//! Fake classifiers for tests

use parking_lot::Mutex;

use super::inference::{Classifier, InferenceError};
use crate::logic::features::FeatureMatrix;

/// Returns `labels[i % labels.len()]` for row `i`, remembers the last matrix
pub struct FixedClassifier {
    labels: Vec<i64>,
    pub last_matrix: Mutex<Option<FeatureMatrix>>,
}

impl FixedClassifier {
    pub fn new(labels: Vec<i64>) -> Self {
        Self {
            labels,
            last_matrix: Mutex::new(None),
        }
    }
}

impl Classifier for FixedClassifier {
    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<i64>, InferenceError> {
        *self.last_matrix.lock() = Some(matrix.clone());
        if self.labels.is_empty() {
            return Err(InferenceError("no labels configured".to_string()));
        }
        Ok((0..matrix.len()).map(|i| self.labels[i % self.labels.len()]).collect())
    }
}

/// Returns a wrong number of labels
pub struct ShortClassifier;

impl Classifier for ShortClassifier {
    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<i64>, InferenceError> {
        Ok(vec![0; matrix.len().saturating_sub(1)])
    }
}

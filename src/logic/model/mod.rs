//! Model Module - Classifier handle
//!
//! Tách logic inference khỏi pipeline.
//! Dễ dàng swap model hoặc inject fake classifier khi test.

pub mod inference;

#[cfg(test)]
pub mod testing;

use std::path::Path;
use std::sync::Arc;

pub use inference::{Classifier, InferenceError, InferenceStats, ModelMetadata, OnnxClassifier};

/// Shared, read-only classifier handle
pub type ClassifierHandle = Arc<dyn Classifier>;

/// Load the classifier at startup.
///
/// A failed load is logged and yields `None`; analysis requests then
/// report the model as unavailable.
pub fn load_classifier(model_path: &Path, intra_threads: usize) -> Option<ClassifierHandle> {
    match OnnxClassifier::load(model_path, intra_threads) {
        Ok(classifier) => Some(Arc::new(classifier)),
        Err(e) => {
            tracing::error!("Error loading model: {}", e);
            None
        }
    }
}

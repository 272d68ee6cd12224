//! Inference Engine - ONNX Runtime Integration
//!
//! Load và chạy ONNX model (classifier export).
//! Pipeline chỉ biết trait `Classifier`, không biết ONNX.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{DynValue, Value};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::logic::features::{FeatureMatrix, FEATURE_COUNT};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    pub model_path: String,
    pub sha256: String,
    pub output_name: String,
    pub features: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Running inference counters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceStats {
    pub inference_count: u64,
    pub rows_classified: u64,
    pub avg_latency_ms: f32,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Error)]
#[error("InferenceError: {0}")]
pub struct InferenceError(pub String);

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trait cho classifiers (ONNX, fake in tests, ...)
///
/// One label per matrix row, same order.
pub trait Classifier: Send + Sync {
    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<i64>, InferenceError>;

    fn metadata(&self) -> Option<ModelMetadata> {
        None
    }

    fn stats(&self) -> InferenceStats {
        InferenceStats::default()
    }
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

pub struct OnnxClassifier {
    // ort needs &mut Session to run
    session: Mutex<Session>,
    metadata: ModelMetadata,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
    rows_classified: AtomicU64,
}

impl OnnxClassifier {
    /// Load ONNX model từ file
    pub fn load(model_path: &Path, intra_threads: usize) -> Result<Self, InferenceError> {
        tracing::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(InferenceError(format!("Model not found: {}", model_path.display())));
        }

        let sha256 = file_sha256(model_path)?;

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
            .with_intra_threads(intra_threads.max(1))
            .map_err(|e| InferenceError(format!("Failed to set threads: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

        let output_name = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError("No output defined".to_string()))?;

        tracing::info!("ONNX model loaded successfully (sha256: {}, output: {})", sha256, output_name);

        Ok(Self {
            session: Mutex::new(session),
            metadata: ModelMetadata {
                model_path: model_path.display().to_string(),
                sha256,
                output_name,
                features: FEATURE_COUNT,
                loaded_at: Utc::now(),
            },
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
            rows_classified: AtomicU64::new(0),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<i64>, InferenceError> {
        if matrix.is_empty() {
            return Ok(Vec::new());
        }

        let start_time = std::time::Instant::now();

        let input_tensor = Value::from_array(matrix.to_array())
            .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

        let labels = {
            let mut session = self.session.lock();
            let outputs = session.run(ort::inputs![input_tensor])
                .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

            let output = outputs.get(&self.metadata.output_name)
                .ok_or_else(|| InferenceError("No output".to_string()))?;

            extract_labels(output)?
        };

        if labels.len() != matrix.len() {
            return Err(InferenceError(format!(
                "Model returned {} labels for {} rows",
                labels.len(),
                matrix.len()
            )));
        }

        let elapsed = start_time.elapsed().as_micros() as u64;
        self.latency_sum_us.fetch_add(elapsed, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);
        self.rows_classified.fetch_add(matrix.len() as u64, Ordering::Relaxed);

        Ok(labels)
    }

    fn metadata(&self) -> Option<ModelMetadata> {
        Some(self.metadata.clone())
    }

    fn stats(&self) -> InferenceStats {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        InferenceStats {
            inference_count: count,
            rows_classified: self.rows_classified.load(Ordering::Relaxed),
            avg_latency_ms: avg,
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Labels from the model's first output.
///
/// Tree exports emit int64 labels. Float outputs are either one score
/// column per class (argmax) or one label per row (rounded).
fn extract_labels(output: &DynValue) -> Result<Vec<i64>, InferenceError> {
    if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
        return Ok(data.to_vec());
    }

    let (shape, data) = output.try_extract_tensor::<f32>()
        .map_err(|e| InferenceError(format!("Extract error: {}", e)))?;

    Ok(labels_from_scores(shape, data))
}

/// Float output → labels.
///
/// `[n, k>1]` is one score row per sample (argmax). `[n]` and `[n, 1]`
/// already hold one label per sample and are rounded.
fn labels_from_scores(shape: &[i64], data: &[f32]) -> Vec<i64> {
    let classes = match shape {
        [_, k] if *k > 1 => *k as usize,
        _ => 1,
    };

    if classes == 1 {
        return data.iter().map(|v| v.round() as i64).collect();
    }

    data.chunks(classes).map(argmax).collect()
}

fn argmax(scores: &[f32]) -> i64 {
    scores.iter()
        .enumerate()
        .fold((0usize, f32::NEG_INFINITY), |best, (i, &s)| if s > best.1 { (i, s) } else { best })
        .0 as i64
}

/// Hex SHA-256 of the model file
pub fn file_sha256(path: &Path) -> Result<String, InferenceError> {
    let bytes = std::fs::read(path)
        .map_err(|e| InferenceError(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

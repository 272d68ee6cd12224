//! Pipeline error kinds
//!
//! Each variant maps to one outcome class at the HTTP boundary.

use thiserror::Error;

use super::features::SchemaError;
use super::model::InferenceError;
use super::threat::LengthMismatch;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Required columns missing after reconciliation. Caller must fix the input.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// No classifier handle was loaded at startup
    #[error("ML model not loaded")]
    ModelUnavailable,

    /// Anything else that stopped the batch
    #[error("Error processing data: {0}")]
    Processing(String),
}

impl From<InferenceError> for AnalysisError {
    fn from(err: InferenceError) -> Self {
        AnalysisError::Processing(err.to_string())
    }
}

impl From<LengthMismatch> for AnalysisError {
    fn from(err: LengthMismatch) -> Self {
        AnalysisError::Processing(err.to_string())
    }
}

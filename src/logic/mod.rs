//! Logic Module - feature preparation and result derivation
//!
//! ```text
//! RawTable ──► features::normalize ──► FeatureMatrix
//!                                         │
//!                                         ▼
//!                                  model::Classifier
//!                                         │ labels
//!                                         ▼
//! RawTable ──────────────────────► threat::synthesize ──► AnalysisReport
//! ```

pub mod features;
pub mod model;
pub mod threat;
pub mod error;
pub mod analyzer;

pub use analyzer::Analyzer;
pub use error::AnalysisError;

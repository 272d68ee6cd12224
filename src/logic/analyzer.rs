//! Analyzer - pipeline entry point
//!
//! RawTable → normalize → classifier → synthesize → AnalysisReport.
//! All-or-nothing: either every row gets a record or the request fails.

use std::sync::Arc;
use std::time::Instant;

use super::error::AnalysisError;
use super::features::{normalize, RawTable};
use super::model::ClassifierHandle;
use super::threat::{synthesize, AnalysisReport, ThreatCatalog};

/// Immutable per-process state shared by every request
#[derive(Clone)]
pub struct Analyzer {
    classifier: Option<ClassifierHandle>,
    catalog: Arc<ThreatCatalog>,
}

impl Analyzer {
    pub fn new(classifier: Option<ClassifierHandle>, catalog: Arc<ThreatCatalog>) -> Self {
        Self { classifier, catalog }
    }

    pub fn classifier(&self) -> Option<&ClassifierHandle> {
        self.classifier.as_ref()
    }

    pub fn catalog(&self) -> &ThreatCatalog {
        &self.catalog
    }

    pub fn is_ready(&self) -> bool {
        self.classifier.is_some()
    }

    /// Run the full pipeline over one uploaded table
    pub fn analyze(&self, mut table: RawTable) -> Result<AnalysisReport, AnalysisError> {
        let classifier = self.classifier.as_ref().ok_or(AnalysisError::ModelUnavailable)?;
        let start = Instant::now();

        let features = normalize(&mut table)?;

        let labels = if table.is_empty() {
            Vec::new()
        } else {
            classifier.predict(&features)?
        };

        let report = synthesize(&table, &labels, &self.catalog)?;

        tracing::info!(
            rows = table.len(),
            high = report.summary.high_risk_threats,
            medium = report.summary.medium_risk_threats,
            low = report.summary.low_risk_threats,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Analysis complete"
        );

        Ok(report)
    }
}

//! Feature Matrix - Core data structure for ML input
//!
//! **One fixed-width row per flow record**
//!
//! Column order comes from `layout.rs`. Only `normalize` builds these,
//! so every matrix matches the current layout.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::layout::FEATURE_COUNT;

/// One normalized row
pub type FeatureRow = [f32; FEATURE_COUNT];

/// Rows in input order, columns in FEATURE_LAYOUT order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    rows: Vec<FeatureRow>,
}

impl FeatureMatrix {
    pub fn from_rows(rows: Vec<FeatureRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[cfg(test)]
    pub fn row(&self, index: usize) -> Option<&FeatureRow> {
        self.rows.get(index)
    }

    /// Get a single value by row and column name
    #[cfg(test)]
    pub fn value(&self, row: usize, column: &str) -> Option<f32> {
        let col = super::layout::feature_index(column)?;
        self.rows.get(row).map(|r| r[col])
    }

    /// Row-major `[rows, FEATURE_COUNT]` tensor for the classifier
    pub fn to_array(&self) -> Array2<f32> {
        let mut array = Array2::<f32>::zeros((self.rows.len(), FEATURE_COUNT));
        for (mut dst, src) in array.rows_mut().into_iter().zip(&self.rows) {
            for (d, s) in dst.iter_mut().zip(src.iter()) {
                *d = *s;
            }
        }
        array
    }
}

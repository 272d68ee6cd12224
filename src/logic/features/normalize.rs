//! Feature Normalizer
//!
//! RawTable → FeatureMatrix.
//! Only column-level problems are errors. Bad cells become 0.

use thiserror::Error;

use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT, LEGACY_METHOD_COLUMN, METHOD_COLUMN};
use super::table::RawTable;
use super::vector::{FeatureMatrix, FeatureRow};

/// Required columns absent after reconciliation, in layout order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required columns: {}", .missing.join(", "))]
pub struct SchemaError {
    pub missing: Vec<String>,
}

/// Trim column names and map the legacy method column onto `_0`.
///
/// Mutates the table so later stages read the same names.
pub fn reconcile_columns(table: &mut RawTable) {
    table.trim_column_names();

    if table.has_column(LEGACY_METHOD_COLUMN) && !table.has_column(METHOD_COLUMN) {
        table.rename_column(LEGACY_METHOD_COLUMN, METHOD_COLUMN);
        tracing::debug!("Renamed column {} -> {}", LEGACY_METHOD_COLUMN, METHOD_COLUMN);
    }
}

/// Required columns the table does not have
pub fn missing_columns(table: &RawTable) -> Vec<String> {
    FEATURE_LAYOUT
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| name.to_string())
        .collect()
}

/// Reconcile, validate and project the table onto the feature layout
pub fn normalize(table: &mut RawTable) -> Result<FeatureMatrix, SchemaError> {
    reconcile_columns(table);

    let missing = missing_columns(table);
    if !missing.is_empty() {
        return Err(SchemaError { missing });
    }

    // Resolved once; every name is present after the check above
    let indices: Vec<usize> = FEATURE_LAYOUT
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();
    debug_assert_eq!(indices.len(), FEATURE_COUNT);

    let rows = table
        .rows()
        .map(|row| {
            let cells = row.cells();
            let mut values: FeatureRow = [0.0; FEATURE_COUNT];
            for (value, &idx) in values.iter_mut().zip(&indices) {
                *value = cells
                    .get(idx)
                    .and_then(|c| c.as_number())
                    .map(|v| v as f32)
                    .unwrap_or(0.0);
            }
            values
        })
        .collect();

    Ok(FeatureMatrix::from_rows(rows))
}

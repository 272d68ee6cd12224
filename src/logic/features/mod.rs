//! Features Module - flow table → classifier input
//!
//! ## Structure
//! - `layout`: Required column contract (names, order, version)
//! - `table`: Raw uploaded rows and CSV parsing
//! - `vector`: Fixed-width feature matrix
//! - `normalize`: Column reconciliation, schema check, numeric coercion

pub mod layout;
pub mod table;
pub mod vector;
pub mod normalize;


pub use layout::{LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT};
pub use table::{Cell, RawTable, RowView, TableError};
pub use vector::{FeatureMatrix, FeatureRow};
pub use normalize::{normalize, SchemaError};

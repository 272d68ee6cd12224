//! Threat Module
//!
//! Biến label của classifier thành ThreatRecord có thể đọc được.
//!
//! ## Structure
//! - `types`: Report types (ThreatLevel, ThreatRecord, Summary, ...)
//! - `catalog`: Label → descriptor table
//! - `synthesize`: Per-row derivation and aggregation
//!
//! ## Usage
//! ```ignore
//! use crate::logic::threat::{synthesize, ThreatCatalog};
//!
//! let report = synthesize(&table, &labels, &ThreatCatalog::standard())?;
//! println!("{} high risk", report.summary.high_risk_threats);
//! ```

pub mod types;
pub mod catalog;
pub mod synthesize;


pub use types::{AnalysisReport, Protocol, Summary, ThreatDescriptor, ThreatLevel, ThreatRecord};
pub use catalog::ThreatCatalog;
pub use synthesize::{synthesize, LengthMismatch};

//! Result Synthesizer
//!
//! Raw rows + classifier labels → ThreatRecords + Summary.
//! Protocol and ports are read from the RAW row, before zero-fill.

use chrono::Utc;

use crate::logic::features::table::{Cell, RawTable, RowView};

use super::catalog::ThreatCatalog;
use super::types::{AnalysisReport, Protocol, Summary, ThreatRecord};

pub const TCP_SRC_PORT: &str = "tcp.srcport";
pub const TCP_DST_PORT: &str = "tcp.dstport";
pub const UDP_PORT: &str = "udp.port";

const SOURCE_PREFIX: &str = "192.168.1.";
const DESTINATION_PREFIX: &str = "10.0.0.";
const OCTET_MODULUS: f64 = 255.0;

/// Label count did not match row count
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("classifier returned {labels} labels for {rows} rows")]
pub struct LengthMismatch {
    pub rows: usize,
    pub labels: usize,
}

/// Annotate every row with its label's descriptor and aggregate.
///
/// `labels[i]` belongs to row `i`.
pub fn synthesize(
    table: &RawTable,
    labels: &[i64],
    catalog: &ThreatCatalog,
) -> Result<AnalysisReport, LengthMismatch> {
    if labels.len() != table.len() {
        return Err(LengthMismatch {
            rows: table.len(),
            labels: labels.len(),
        });
    }

    let threats: Vec<ThreatRecord> = table
        .rows()
        .zip(labels)
        .map(|(row, &label)| build_record(row, label, catalog))
        .collect();

    let summary = Summary::from_records(&threats);

    Ok(AnalysisReport { threats, summary })
}

fn build_record(row: RowView<'_>, label: i64, catalog: &ThreatCatalog) -> ThreatRecord {
    let descriptor = catalog.lookup(label);
    let (source_port, dest_port) = resolve_ports(row);

    ThreatRecord {
        timestamp: Utc::now(),
        source_ip: synthetic_source_ip(source_port),
        destination_ip: synthetic_destination_ip(dest_port),
        protocol: infer_protocol(row),
        threat_level: descriptor.threat_level,
        confidence: descriptor.confidence,
        attack_type: descriptor.attack_type.clone(),
    }
}

// ============================================================================
// PER-ROW DERIVATION
// ============================================================================

/// TCP if either TCP port cell is present in the raw row, even if it is 0
pub fn infer_protocol(row: RowView<'_>) -> Protocol {
    if row.get(TCP_SRC_PORT).is_present() || row.get(TCP_DST_PORT).is_present() {
        Protocol::Tcp
    } else {
        Protocol::Udp
    }
}

/// Truthy port value: finite, non-zero, truncated toward zero.
///
/// A genuine port 0 is indistinguishable from "no port" here.
/// Kept as `f64` so huge values are not clamped before the modulo.
fn truthy_port(cell: &Cell) -> Option<f64> {
    cell.as_number()
        .filter(|v| v.is_finite() && *v != 0.0)
        .map(f64::trunc)
}

/// First truthy of (tcp, udp, 0) for each side
pub fn resolve_ports(row: RowView<'_>) -> (f64, f64) {
    let udp = truthy_port(row.get(UDP_PORT));

    let source = truthy_port(row.get(TCP_SRC_PORT)).or(udp).unwrap_or(0.0);
    let dest = truthy_port(row.get(TCP_DST_PORT)).or(udp).unwrap_or(0.0);

    (source, dest)
}

/// Last octet for a port, always in 0..255. Exact for any finite integer value.
fn octet(port: f64) -> i64 {
    port.rem_euclid(OCTET_MODULUS) as i64
}

/// Placeholder source address. Not real attribution.
pub fn synthetic_source_ip(port: f64) -> String {
    format!("{}{}", SOURCE_PREFIX, octet(port))
}

/// Placeholder destination address. Not real attribution.
pub fn synthetic_destination_ip(port: f64) -> String {
    format!("{}{}", DESTINATION_PREFIX, octet(port))
}

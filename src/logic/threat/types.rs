//! Threat Types
//!
//! Core types cho threat report.
//! KHÔNG chứa logic - chỉ data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// THREAT LEVEL
// ============================================================================

/// Severity attached to a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreatLevel {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
    /// Label not in the catalog
    #[serde(rename = "No")]
    No,
}

// ============================================================================
// PROTOCOL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Tcp,
    Udp,
}

// ============================================================================
// DESCRIPTOR
// ============================================================================

/// Static metadata for one classifier label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatDescriptor {
    pub attack_type: String,
    pub threat_level: ThreatLevel,
    /// Fixed per label, in (0, 1]
    pub confidence: f32,
}

impl ThreatDescriptor {
    pub fn new(attack_type: &str, threat_level: ThreatLevel, confidence: f32) -> Self {
        Self {
            attack_type: attack_type.to_string(),
            threat_level,
            confidence,
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// One annotated input row.
///
/// `source_ip`/`destination_ip` are placeholders computed from port
/// numbers. They are NOT observed addresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "sourceIP")]
    pub source_ip: String,
    #[serde(rename = "destinationIP")]
    pub destination_ip: String,
    pub protocol: Protocol,
    pub threat_level: ThreatLevel,
    pub confidence: f32,
    pub attack_type: String,
}

/// Counts over the records of one request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_threats: usize,
    pub high_risk_threats: usize,
    pub medium_risk_threats: usize,
    pub low_risk_threats: usize,
}

impl Summary {
    pub fn from_records(records: &[ThreatRecord]) -> Self {
        let mut summary = Summary {
            total_threats: records.len(),
            ..Default::default()
        };

        for record in records {
            match record.threat_level {
                ThreatLevel::High => summary.high_risk_threats += 1,
                ThreatLevel::Medium => summary.medium_risk_threats += 1,
                ThreatLevel::Low => summary.low_risk_threats += 1,
                ThreatLevel::No => {}
            }
        }

        summary
    }
}

/// Full analysis payload returned to the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub threats: Vec<ThreatRecord>,
    pub summary: Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: ThreatLevel) -> ThreatRecord {
        ThreatRecord {
            timestamp: Utc::now(),
            source_ip: "192.168.1.0".to_string(),
            destination_ip: "10.0.0.0".to_string(),
            protocol: Protocol::Udp,
            threat_level: level,
            confidence: 0.5,
            attack_type: "Unknown".to_string(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let records = vec![
            record(ThreatLevel::High),
            record(ThreatLevel::High),
            record(ThreatLevel::Medium),
            record(ThreatLevel::Low),
            record(ThreatLevel::No),
        ];
        let summary = Summary::from_records(&records);

        assert_eq!(summary.total_threats, 5);
        assert_eq!(summary.high_risk_threats, 2);
        assert_eq!(summary.medium_risk_threats, 1);
        assert_eq!(summary.low_risk_threats, 1);
    }

    #[test]
    fn test_record_json_field_names() {
        let json = serde_json::to_value(record(ThreatLevel::No)).unwrap();

        assert_eq!(json["sourceIP"], "192.168.1.0");
        assert_eq!(json["destinationIP"], "10.0.0.0");
        assert_eq!(json["protocol"], "UDP");
        assert_eq!(json["threatLevel"], "No");
        assert_eq!(json["attackType"], "Unknown");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_summary_json_field_names() {
        let json = serde_json::to_value(Summary::default()).unwrap();
        for key in ["totalThreats", "highRiskThreats", "mediumRiskThreats", "lowRiskThreats"] {
            assert_eq!(json[key], 0, "{key}");
        }
    }

    #[test]
    fn test_level_serialization() {
        assert_eq!(serde_json::to_string(&ThreatLevel::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&Protocol::Tcp).unwrap(), "\"TCP\"");
    }
}

//! Threat Catalog - label → descriptor
//!
//! Built once at startup, shared read-only behind an `Arc`.

use std::collections::BTreeMap;

use super::types::{ThreatDescriptor, ThreatLevel};

/// Confidence reported for labels the catalog does not know
pub const FALLBACK_CONFIDENCE: f32 = 0.5;

/// Immutable label table with a fallback entry
#[derive(Debug, Clone)]
pub struct ThreatCatalog {
    entries: BTreeMap<i64, ThreatDescriptor>,
    fallback: ThreatDescriptor,
}

impl ThreatCatalog {
    /// The six classes the shipped classifier was trained on
    pub fn standard() -> Self {
        let entries = [
            (0, ThreatDescriptor::new("HTTP", ThreatLevel::Low, 0.95)),
            (1, ThreatDescriptor::new("ICMP", ThreatLevel::High, 0.88)),
            (2, ThreatDescriptor::new("Normal", ThreatLevel::Medium, 0.78)),
            (3, ThreatDescriptor::new("Password Attack", ThreatLevel::High, 0.92)),
            (4, ThreatDescriptor::new("TCP SYN", ThreatLevel::Medium, 0.85)),
            (5, ThreatDescriptor::new("UDP", ThreatLevel::High, 0.89)),
        ];

        Self {
            entries: entries.into_iter().collect(),
            fallback: ThreatDescriptor::new("Unknown", ThreatLevel::No, FALLBACK_CONFIDENCE),
        }
    }

    /// Descriptor for `label`, fallback if unknown
    pub fn lookup(&self, label: i64) -> &ThreatDescriptor {
        self.entries.get(&label).unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &ThreatDescriptor {
        &self.fallback
    }

    /// Known labels in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &ThreatDescriptor)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_entries() {
        let catalog = ThreatCatalog::standard();
        assert_eq!(catalog.iter().count(), 6);

        let expected = [
            (0, "HTTP", ThreatLevel::Low, 0.95),
            (1, "ICMP", ThreatLevel::High, 0.88),
            (2, "Normal", ThreatLevel::Medium, 0.78),
            (3, "Password Attack", ThreatLevel::High, 0.92),
            (4, "TCP SYN", ThreatLevel::Medium, 0.85),
            (5, "UDP", ThreatLevel::High, 0.89),
        ];
        for (label, attack, level, confidence) in expected {
            let d = catalog.lookup(label);
            assert_eq!(d.attack_type, attack);
            assert_eq!(d.threat_level, level);
            assert_eq!(d.confidence, confidence);
        }
    }

    #[test]
    fn test_unknown_labels_fall_back() {
        let catalog = ThreatCatalog::standard();
        for label in [-1, 6, 42, i64::MAX] {
            assert!(catalog.iter().all(|(known, _)| known != label));
            let d = catalog.lookup(label);
            assert_eq!(d.attack_type, "Unknown");
            assert_eq!(d.threat_level, ThreatLevel::No);
            assert_eq!(d.confidence, 0.5);
        }
    }

    #[test]
    fn test_confidences_in_range() {
        let catalog = ThreatCatalog::standard();
        for (_, d) in catalog.iter() {
            assert!(d.confidence > 0.0 && d.confidence <= 1.0);
        }
    }
}

//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the column contract of the classifier**
//!
//! ## Rules (NEVER break these):
//! 1. Add column → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove column → increment FEATURE_VERSION
//!
//! The classifier was trained on exactly these columns in exactly this
//! order. Any drift here silently produces garbage labels.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Required columns in exact classifier order
pub const FEATURE_LAYOUT: &[&str] = &[
    // === HTTP (0) ===
    "http.content_length",      // 0: Declared HTTP body length

    // === TCP (1-5) ===
    "tcp.connection.syn",       // 1: SYN-only connection attempt flag
    "tcp.dstport",              // 2: TCP destination port
    "tcp.flags.ack",            // 3: ACK flag
    "tcp.len",                  // 4: TCP segment payload length
    "tcp.srcport",              // 5: TCP source port

    // === UDP (6-7) ===
    "udp.port",                 // 6: UDP port
    "udp.time_delta",           // 7: Time since previous UDP frame

    // === DNS (8) ===
    "dns.qry.type",             // 8: DNS query type code

    // === HTTP method one-hot (9-11) ===
    "http.request.method_0",    // 9: No / other method
    "http.request.method_GET",  // 10: GET
    "http.request.method_POST", // 11: POST
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 12;

/// Legacy name of the "no method" indicator column
pub const LEGACY_METHOD_COLUMN: &str = "http.request.method";

/// Current name of the "no method" indicator column
pub const METHOD_COLUMN: &str = "http.request.method_0";

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for the schema endpoint and startup logs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
#[cfg(test)]
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 12);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_order_matches_training_columns() {
        assert_eq!(
            FEATURE_LAYOUT,
            &[
                "http.content_length",
                "tcp.connection.syn",
                "tcp.dstport",
                "tcp.flags.ack",
                "tcp.len",
                "tcp.srcport",
                "udp.port",
                "udp.time_delta",
                "dns.qry.type",
                "http.request.method_0",
                "http.request.method_GET",
                "http.request.method_POST",
            ]
        );
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(layout_hash(), layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("http.content_length"), Some(0));
        assert_eq!(feature_index("tcp.srcport"), Some(5));
        assert_eq!(feature_index(METHOD_COLUMN), Some(9));
        assert_eq!(feature_index(LEGACY_METHOD_COLUMN), None);
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_count, FEATURE_COUNT);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
    }
}

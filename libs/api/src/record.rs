use serde::{Deserialize, Serialize};

/// Identity assigned by a store on creation. Starts at 1, strictly increasing.
pub type RecordId = u64;

// ════════════════════════════════════════════════════════════════
//  Record
// ════════════════════════════════════════════════════════════════

/// One captured payload, bucketed by the contract path it was posted to.
///
/// Records are append-only: a store creates them once and never mutates
/// them afterwards. The serialized form of `payload` is a storage detail
/// and never leaves the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub identity: RecordId,
    /// Path exactly as declared in the contract (templates included).
    pub path: String,
    pub payload: serde_json::Value,
}

impl Record {
    pub fn new(identity: RecordId, path: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            identity,
            path: path.into(),
            payload,
        }
    }
}

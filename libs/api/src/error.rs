use crate::record::RecordId;

/// Failure converting a payload to or from its stored text.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("encode payload: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("decode payload: {0}")]
    Decoding(#[source] serde_json::Error),
}

/// Unified error type for [`RecordStore`](crate::RecordStore) operations.
///
/// `Init` is fatal at startup; every other variant is a per-request failure
/// that the HTTP layer maps to a server-class response.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store init: {0}")]
    Init(String),

    #[error("store backend: {0}")]
    Backend(String),

    #[error("{0}")]
    Codec(#[from] CodecError),

    /// Stored text of an existing record no longer decodes.
    #[error("record {identity} is corrupt: {source}")]
    Corrupt {
        identity: RecordId,
        #[source]
        source: CodecError,
    },
}

impl StoreError {
    pub fn init(msg: impl Into<String>) -> Self {
        StoreError::Init(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        StoreError::Backend(msg.into())
    }
}

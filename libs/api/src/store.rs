use std::future::Future;
use std::pin::Pin;

use crate::error::StoreError;
use crate::record::Record;

/// Boxed future returned by [`RecordStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

// ════════════════════════════════════════════════════════════════
//  RecordStore
// ════════════════════════════════════════════════════════════════

/// Schema-less persistence for captured payloads.
///
/// Implementations are shared across request tasks as
/// `Arc<dyn RecordStore>` and must serialize writers enough that identities
/// are unique and `list_by_path` never sees a half-written record.
pub trait RecordStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Create the schema if missing. Idempotent; called once at startup.
    fn init(&self) -> StoreFuture<'_, ()>;

    /// Persist `payload` under `path` and return the stored record.
    fn create(&self, path: &str, payload: serde_json::Value) -> StoreFuture<'_, Record>;

    /// All records created under exactly `path`, oldest first.
    ///
    /// Empty when nothing was posted to `path`. A record whose stored text
    /// fails to decode is reported as [`StoreError::Corrupt`], not skipped.
    fn list_by_path(&self, path: &str) -> StoreFuture<'_, Vec<Record>>;
}

use std::sync::Arc;

use tokio::sync::RwLock;

use specmock_api::{Record, RecordId, RecordStore, StoreError, StoreFuture, codec};

// ═══════════════════════════════════════════════════════════════
//  MemoryStore
// ═══════════════════════════════════════════════════════════════

/// Row as kept in memory: the payload lives only in its encoded form,
/// exactly as a durable backend would hold it.
struct StoredRow {
    identity: RecordId,
    path: String,
    raw: String,
}

#[derive(Default)]
struct Rows {
    last_id: RecordId,
    rows: Vec<StoredRow>,
}

/// Volatile record store. Everything is lost when the process exits;
/// meant for tests and throwaway mock sessions.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Rows>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn insert(&self, path: String, payload: serde_json::Value) -> Result<Record, StoreError> {
        let raw = codec::encode(&payload)?;
        let mut guard = self.inner.write().await;
        guard.last_id += 1;
        let identity = guard.last_id;
        guard.rows.push(StoredRow {
            identity,
            path: path.clone(),
            raw,
        });
        tracing::trace!(identity, path = %path, "memory row appended");
        Ok(Record::new(identity, path, payload))
    }

    async fn select(&self, path: String) -> Result<Vec<Record>, StoreError> {
        let guard = self.inner.read().await;
        guard
            .rows
            .iter()
            .filter(|row| row.path == path)
            .map(|row| {
                let payload = codec::decode(&row.raw).map_err(|source| StoreError::Corrupt {
                    identity: row.identity,
                    source,
                })?;
                Ok(Record::new(row.identity, row.path.clone(), payload))
            })
            .collect()
    }
}

impl RecordStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn init(&self) -> StoreFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }

    fn create(&self, path: &str, payload: serde_json::Value) -> StoreFuture<'_, Record> {
        Box::pin(self.insert(path.to_string(), payload))
    }

    fn list_by_path(&self, path: &str) -> StoreFuture<'_, Vec<Record>> {
        Box::pin(self.select(path.to_string()))
    }
}

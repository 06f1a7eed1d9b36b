use std::sync::{Arc, Mutex};

use rusqlite::{Connection, params};

use specmock_api::{Record, RecordId, RecordStore, StoreError, StoreFuture, codec};

use crate::config::SqliteStoreConfig;
use crate::schema;

// ════════════════════════════════════════════════════════════════
//  SqliteStore
// ════════════════════════════════════════════════════════════════

/// Durable record store on a single SQLite connection.
///
/// The connection sits behind a mutex and every statement runs on the
/// blocking pool, so writers are serialized and readers never observe a
/// partially inserted row.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    location: String,
}

impl SqliteStore {
    /// Open (or create) the database described by `config`.
    ///
    /// Fails with [`StoreError::Init`]. The table itself is created by
    /// [`RecordStore::init`].
    pub fn open(config: &SqliteStoreConfig) -> Result<Self, StoreError> {
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()
        } else {
            Connection::open(&config.path)
        }
        .map_err(|e| StoreError::init(format!("open {}: {e}", config.path)))?;

        conn.busy_timeout(config.busy_timeout())
            .map_err(|e| StoreError::init(format!("busy_timeout: {e}")))?;
        if !config.is_in_memory() {
            conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
                .map_err(|e| StoreError::init(format!("journal_mode: {e}")))?;
        }

        tracing::debug!(path = %config.path, "sqlite connection opened");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            location: config.path.clone(),
        })
    }

    /// [`SqliteStore::open`] on the blocking pool, for callers already
    /// running inside the runtime.
    pub async fn connect(config: SqliteStoreConfig) -> Result<Self, StoreError> {
        tokio::task::spawn_blocking(move || Self::open(&config))
            .await
            .map_err(|e| StoreError::init(format!("sqlite open task: {e}")))?
    }

    /// Private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::open(&SqliteStoreConfig {
            path: ":memory:".to_string(),
            ..SqliteStoreConfig::default()
        })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::backend("sqlite connection lock poisoned"))?;
            f(&guard)
        })
        .await
        .map_err(|e| StoreError::backend(format!("sqlite task: {e}")))?
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute_batch(schema::CREATE_SCHEMA)
                .map_err(|e| StoreError::init(format!("create table {}: {e}", schema::TABLE)))
        })
        .await
    }

    async fn insert(&self, path: String, payload: serde_json::Value) -> Result<Record, StoreError> {
        let raw = codec::encode(&payload)?;
        let stored_path = path.clone();
        let identity = self
            .with_conn(move |conn| {
                conn.execute(schema::INSERT_RECORD, params![stored_path, raw])
                    .map_err(|e| StoreError::backend(format!("insert: {e}")))?;
                to_identity(conn.last_insert_rowid())
            })
            .await?;
        Ok(Record::new(identity, path, payload))
    }

    async fn select(&self, path: String) -> Result<Vec<Record>, StoreError> {
        let rows = self
            .with_conn(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_BY_PATH)
                    .map_err(|e| StoreError::backend(format!("prepare select: {e}")))?;
                let rows = stmt
                    .query_map(params![path], |row| {
                        Ok((
                            row.get::<_, i64>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                        ))
                    })
                    .map_err(|e| StoreError::backend(format!("select: {e}")))?;
                rows.collect::<Result<Vec<_>, _>>()
                    .map_err(|e| StoreError::backend(format!("read row: {e}")))
            })
            .await?;

        rows.into_iter()
            .map(|(id, path, raw)| {
                let identity = to_identity(id)?;
                let payload = codec::decode(&raw)
                    .map_err(|source| StoreError::Corrupt { identity, source })?;
                Ok(Record::new(identity, path, payload))
            })
            .collect()
    }
}

fn to_identity(rowid: i64) -> Result<RecordId, StoreError> {
    RecordId::try_from(rowid).map_err(|_| StoreError::backend(format!("invalid row id {rowid}")))
}

// ════════════════════════════════════════════════════════════════
//  RecordStore impl
// ════════════════════════════════════════════════════════════════

impl RecordStore for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn init(&self) -> StoreFuture<'_, ()> {
        Box::pin(self.migrate())
    }

    fn create(&self, path: &str, payload: serde_json::Value) -> StoreFuture<'_, Record> {
        Box::pin(self.insert(path.to_string(), payload))
    }

    fn list_by_path(&self, path: &str) -> StoreFuture<'_, Vec<Record>> {
        Box::pin(self.select(path.to_string()))
    }
}

//! SQLite-backed [`RecordStore`](specmock_api::RecordStore).
//!
//! Payloads live as JSON text in one opaque column; the table layout is the
//! same `request_items(id, path, raw_data)` used by earlier versions of the
//! mock server, so an existing `requests.db` keeps working.

mod config;
mod schema;
mod storage;

pub use config::SqliteStoreConfig;
pub use storage::SqliteStore;

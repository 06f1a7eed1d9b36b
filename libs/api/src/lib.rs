//! Shared types for the mock server: the persisted [`Record`], the payload
//! codec and the [`RecordStore`] contract every storage backend implements.

pub mod codec;
pub mod error;
pub mod record;
pub mod store;

pub use error::{CodecError, StoreError};
pub use record::{Record, RecordId};
pub use store::{RecordStore, StoreFuture};

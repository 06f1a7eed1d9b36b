use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use specmock_api::RecordStore;
use specmock_storage_memory::MemoryStore;
use specmock_storage_sqlite::SqliteStore;

use crate::config::{ServeArgs, ServerConfig, StorageConfig};
use crate::error::ServerError;

pub async fn run(args: ServeArgs) -> Result<(), ServerError> {
    tracing::info!("specmock starting");

    // --- Config + contract ---
    let config = ServerConfig::resolve(&args)?;
    let table = super::load_routes(&config)?;

    // --- Store ---
    let store = open_store(&config.storage).await?;

    // --- Routes are fixed from here on ---
    let app = table.into_router(store);

    // --- CancellationToken for graceful shutdown ---
    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("shutting down..."),
            Err(e) => tracing::error!(error = %e, "failed to listen for ctrl-c, shutting down"),
        }
        signal_token.cancel();
    });

    specmock_api_server::run(&config.bind, app, token).await?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// Open the configured backend and create its schema.
pub(crate) async fn open_store(storage: &StorageConfig) -> Result<Arc<dyn RecordStore>, ServerError> {
    let store: Arc<dyn RecordStore> = match storage {
        StorageConfig::Sqlite(cfg) => {
            let store = SqliteStore::connect(cfg.clone())
                .await
                .map_err(ServerError::StoreInit)?;
            tracing::info!(path = %store.location(), "opened sqlite store");
            Arc::new(store)
        }
        StorageConfig::Memory => {
            tracing::warn!("memory store: records are lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    store.init().await.map_err(ServerError::StoreInit)?;
    tracing::info!(backend = store.backend(), "store ready");
    Ok(store)
}

//! HTTP surface of the mock server.
//!
//! [`RouteTable`] turns a contract into handler bindings once at startup;
//! [`run`] serves the resulting router until the shutdown token fires.

mod error;
mod handlers;
mod routes;

use std::sync::Arc;

use axum::Router;
use tokio_util::sync::CancellationToken;

use specmock_api::RecordStore;
use specmock_contract::ContractDocument;

pub use error::{ApiError, RouteError, ServeError};
pub use routes::{Binding, RouteTable, route_pattern};

#[derive(Clone)]
pub(crate) struct AppState {
    store: Arc<dyn RecordStore>,
}

/// Build the router for every POST/GET operation declared in `contract`.
pub fn build_router(
    contract: &ContractDocument,
    store: Arc<dyn RecordStore>,
) -> Result<Router, RouteError> {
    Ok(RouteTable::from_contract(contract)?.into_router(store))
}

/// Bind `addr` and serve `app` until `shutdown` is cancelled.
pub async fn run(addr: &str, app: Router, shutdown: CancellationToken) -> Result<(), ServeError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServeError::Bind { addr: addr.to_string(), source: e })?;

    let local = listener.local_addr().map_err(ServeError::Serve)?;
    tracing::info!(addr = %local, "api server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(ServeError::Serve)?;

    Ok(())
}

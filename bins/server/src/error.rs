use specmock_api::StoreError;
use specmock_api_server::{RouteError, ServeError};
use specmock_contract::ContractError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("{0}")]
    Contract(#[from] ContractError),

    #[error("route: {0}")]
    Route(#[from] RouteError),

    #[error("{0}")]
    StoreInit(#[source] StoreError),

    #[error("{0}")]
    Serve(#[from] ServeError),
}

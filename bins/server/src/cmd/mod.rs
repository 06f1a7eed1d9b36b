pub mod routes;
pub mod serve;

use specmock_api_server::RouteTable;
use specmock_contract::ContractDocument;

use crate::config::ServerConfig;
use crate::error::ServerError;

/// Load the configured contract and derive its route table.
pub(crate) fn load_routes(config: &ServerConfig) -> Result<RouteTable, ServerError> {
    let contract = ContractDocument::load(&config.contract)?;
    tracing::info!(
        contract = %config.contract,
        title = contract.title().unwrap_or("-"),
        paths = contract.paths().len(),
        "loaded contract"
    );

    let table = RouteTable::from_contract(&contract)?;
    if table.is_empty() {
        tracing::warn!(contract = %config.contract, "contract declares no POST or GET operations");
    }
    Ok(table)
}

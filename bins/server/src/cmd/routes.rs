use specmock_api_server::RouteTable;

use crate::config::{ServeArgs, ServerConfig};
use crate::error::ServerError;

/// Print the bindings derived from the contract without serving them.
pub fn run(args: ServeArgs) -> Result<(), ServerError> {
    let config = ServerConfig::resolve(&args)?;
    let table = super::load_routes(&config)?;
    for line in render(&table) {
        println!("{line}");
    }
    Ok(())
}

fn render(table: &RouteTable) -> Vec<String> {
    table
        .bindings()
        .map(|(pattern, binding, path)| {
            let method = binding.method();
            if pattern == path {
                format!("{method:<5} {path}")
            } else {
                format!("{method:<5} {path}  (route {pattern})")
            }
        })
        .collect()
}

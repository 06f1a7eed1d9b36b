use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

pub use specmock_storage_sqlite::SqliteStoreConfig;

#[derive(Parser)]
#[command(name = "specmock", about = "Mock HTTP server derived from an OpenAPI contract")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the mocked endpoints
    Serve(ServeArgs),
    /// Print the endpoints the contract produces and exit
    Routes(ServeArgs),
}

#[derive(Args, Clone, Debug, Default)]
pub struct ServeArgs {
    /// Path to TOML config file. Defaults apply when omitted.
    #[arg(long, env = "SPECMOCK_CONFIG")]
    pub config: Option<String>,

    /// Contract document (.json, .yaml or .yml). Overrides the config file.
    #[arg(long, env = "SPECMOCK_CONTRACT")]
    pub contract: Option<String>,

    /// Listen address, e.g. 127.0.0.1:8080. Overrides the config file.
    #[arg(long, env = "SPECMOCK_BIND")]
    pub bind: Option<String>,
}

// ---- TOML Config ----

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_contract")]
    pub contract: String,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// `[storage]` table, selected by `kind`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageConfig {
    Sqlite(SqliteStoreConfig),
    Memory,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Sqlite(SqliteStoreConfig::default())
    }
}

fn default_contract() -> String {
    "openapi.json".to_string()
}
fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            contract: default_contract(),
            bind: default_bind(),
            storage: StorageConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn load(path: &str) -> Result<Self, crate::error::ServerError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::ServerError::Config { context: "read", detail: format!("'{path}': {e}") })?;
        Self::parse(&content)
            .map_err(|e| crate::error::ServerError::Config { context: "parse", detail: format!("'{path}': {e}") })
    }

    pub fn parse(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Config file (or defaults) with command line overrides applied.
    pub fn resolve(args: &ServeArgs) -> Result<Self, crate::error::ServerError> {
        let mut config = match &args.config {
            Some(path) => {
                let config = Self::load(path)?;
                tracing::info!(config = %path, "loaded config");
                config
            }
            None => Self::default(),
        };
        if let Some(contract) = &args.contract {
            config.contract = contract.clone();
        }
        if let Some(bind) = &args.bind {
            config.bind = bind.clone();
        }
        Ok(config)
    }
}

use crate::ContractFormat;

#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("read contract '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse contract ({format}): {detail}")]
    Parse { format: ContractFormat, detail: String },

    #[error("contract path '{0}' must start with '/'")]
    InvalidPath(String),
}

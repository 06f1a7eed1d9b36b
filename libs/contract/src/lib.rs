//! OpenAPI contract loader.
//!
//! Only the shape the mock server needs is read: the `paths` table and the
//! HTTP methods declared under each path. Operation bodies (parameters,
//! schemas, responses) are kept out of the model.

mod error;
mod method;

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

pub use error::ContractError;
pub use method::Method;

// ════════════════════════════════════════════════════════════════
//  Model
// ════════════════════════════════════════════════════════════════

/// Serialization format of a contract file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractFormat {
    Json,
    Yaml,
}

impl ContractFormat {
    /// `.yaml` / `.yml` is YAML, everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ContractFormat::Yaml
            }
            _ => ContractFormat::Json,
        }
    }
}

impl std::fmt::Display for ContractFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractFormat::Json => f.write_str("json"),
            ContractFormat::Yaml => f.write_str("yaml"),
        }
    }
}

/// One declared operation under a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub method: Method,
    pub operation_id: Option<String>,
}

/// A contract path with the operations declared for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathItem {
    pub path: String,
    pub operations: Vec<Operation>,
}

/// Parsed contract document: path -> declared operations.
#[derive(Debug, Clone, Default)]
pub struct ContractDocument {
    title: Option<String>,
    paths: Vec<PathItem>,
}

// ── Raw serde shape ──

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    info: Option<RawInfo>,
    #[serde(default)]
    paths: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

#[derive(Deserialize)]
struct RawInfo {
    #[serde(default)]
    title: Option<String>,
}

impl ContractDocument {
    /// Load a contract file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContractError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ContractError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content, ContractFormat::from_path(path))
    }

    /// Parse a contract from text in the given format.
    pub fn parse(content: &str, format: ContractFormat) -> Result<Self, ContractError> {
        let raw: RawDocument = match format {
            ContractFormat::Json => serde_json::from_str(content)
                .map_err(|e| ContractError::Parse { format, detail: e.to_string() })?,
            ContractFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| ContractError::Parse { format, detail: e.to_string() })?,
        };
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDocument) -> Result<Self, ContractError> {
        let mut paths = Vec::with_capacity(raw.paths.len());
        for (path, item) in raw.paths {
            if !path.starts_with('/') {
                return Err(ContractError::InvalidPath(path));
            }
            let operations = item
                .iter()
                .filter_map(|(key, op)| {
                    // Non-method keys: parameters, summary, servers, $ref, x-*
                    let method = key.parse::<Method>().ok()?;
                    let operation_id = op
                        .get("operationId")
                        .and_then(|v| v.as_str())
                        .map(str::to_string);
                    Some(Operation { method, operation_id })
                })
                .collect();
            paths.push(PathItem { path, operations });
        }

        Ok(Self {
            title: raw.info.and_then(|i| i.title),
            paths,
        })
    }

    /// Build a document directly from `(path, methods)` pairs.
    pub fn from_paths<I, P, M>(paths: I) -> Result<Self, ContractError>
    where
        I: IntoIterator<Item = (P, M)>,
        P: Into<String>,
        M: IntoIterator<Item = Method>,
    {
        let mut items = Vec::new();
        for (path, methods) in paths {
            let path = path.into();
            if !path.starts_with('/') {
                return Err(ContractError::InvalidPath(path));
            }
            let operations = methods
                .into_iter()
                .map(|method| Operation { method, operation_id: None })
                .collect();
            items.push(PathItem { path, operations });
        }
        Ok(Self { title: None, paths: items })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn paths(&self) -> &[PathItem] {
        &self.paths
    }

    /// Every declared `(path, method)` pair.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &Operation)> + '_ {
        self.paths
            .iter()
            .flat_map(|item| item.operations.iter().map(move |op| (item.path.as_str(), op)))
    }
}

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::MethodRouter;

use specmock_api::RecordStore;
use specmock_contract::{ContractDocument, Method};

use crate::error::RouteError;
use crate::{AppState, handlers};

// ════════════════════════════════════════════════════════════════
//  Binding
// ════════════════════════════════════════════════════════════════

/// Generic behavior a contract operation is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Binding {
    /// POST: record the body.
    Create,
    /// GET: replay everything recorded for the path.
    List,
}

impl Binding {
    /// `None` for methods the mock surface does not serve.
    pub fn for_method(method: Method) -> Option<Self> {
        match method {
            Method::Post => Some(Binding::Create),
            Method::Get => Some(Binding::List),
            _ => None,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Binding::Create => Method::Post,
            Binding::List => Method::Get,
        }
    }
}

// ════════════════════════════════════════════════════════════════
//  RouteTable
// ════════════════════════════════════════════════════════════════

/// Explicit `(route pattern, binding) -> declared path` table.
///
/// Built once from the contract before the listener is bound and consumed
/// by [`RouteTable::into_router`]. The declared path string is what records
/// are bucketed under; the pattern is what axum matches against.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: BTreeMap<String, BTreeMap<Binding, String>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contract(contract: &ContractDocument) -> Result<Self, RouteError> {
        let mut table = Self::new();
        for (path, operation) in contract.operations() {
            table.bind(path, operation.method)?;
        }
        Ok(table)
    }

    /// Bind one declared operation. Unsupported methods are skipped and
    /// yield `Ok(None)`. A second binding for the same pattern and method
    /// replaces the first.
    pub fn bind(&mut self, path: &str, method: Method) -> Result<Option<Binding>, RouteError> {
        let Some(binding) = Binding::for_method(method) else {
            tracing::debug!(path = %path, method = %method, "method not mocked, skipping");
            return Ok(None);
        };

        let pattern = route_pattern(path)?;
        let slot = self.routes.entry(pattern).or_default();
        if let Some((other, declared)) = slot
            .iter()
            .find(|(bound, declared)| **bound != binding && declared.as_str() != path)
        {
            tracing::warn!(
                path = %path,
                method = %method,
                other_path = %declared,
                other_method = %other.method(),
                "same route declared under different spellings, records are bucketed separately"
            );
        }
        if let Some(previous) = slot.insert(binding, path.to_string()) {
            tracing::warn!(
                path = %path,
                previous = %previous,
                method = %method,
                "duplicate route declaration, last one wins"
            );
        }
        Ok(Some(binding))
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.routes.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(pattern, binding, declared path)` for every binding, ordered by pattern.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, Binding, &str)> + '_ {
        self.routes.iter().flat_map(|(pattern, slot)| {
            slot.iter()
                .map(move |(binding, path)| (pattern.as_str(), *binding, path.as_str()))
        })
    }

    /// Declared path bound to `binding` under `pattern`.
    #[cfg(test)]
    fn bound_path(&self, pattern: &str, binding: Binding) -> Option<&str> {
        self.routes
            .get(pattern)
            .and_then(|slot| slot.get(&binding))
            .map(String::as_str)
    }

    /// Register every binding with axum. Each handler owns its own copy of
    /// the declared path; nothing is looked up per request.
    pub fn into_router(self, store: Arc<dyn RecordStore>) -> Router {
        let mut router = Router::new();

        for (pattern, slot) in self.routes {
            let mut method_router: MethodRouter<AppState> = MethodRouter::new();
            for (binding, path) in slot {
                tracing::info!(method = %binding.method(), path = %path, route = %pattern, "route bound");
                let path: Arc<str> = Arc::from(path);
                method_router = match binding {
                    Binding::Create => method_router.post(
                        move |State(state): State<AppState>, body: Bytes| {
                            handlers::create(state, path, body)
                        },
                    ),
                    Binding::List => method_router
                        .get(move |State(state): State<AppState>| handlers::list(state, path)),
                };
            }
            router = router.route(&pattern, method_router);
        }

        router
            .fallback(handlers::not_found)
            .with_state(AppState { store })
    }
}

// ════════════════════════════════════════════════════════════════
//  Path templates
// ════════════════════════════════════════════════════════════════

/// Translate a contract path into an axum route pattern.
///
/// Whole-segment templates (`/widgets/{id}`) become positional captures
/// (`/widgets/{p0}`), so two spellings of the same template share a route.
/// Literal segments pass through unchanged.
pub fn route_pattern(path: &str) -> Result<String, RouteError> {
    if !path.starts_with('/') {
        return Err(RouteError::NotAbsolute(path.to_string()));
    }

    let mut captures = 0usize;
    let mut segments = Vec::new();
    for segment in path.split('/') {
        let is_template = segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}');
        if is_template {
            let name = &segment[1..segment.len() - 1];
            if name.is_empty() {
                return Err(RouteError::EmptyTemplate {
                    path: path.to_string(),
                    segment: segment.to_string(),
                });
            }
            if name.contains(['{', '}']) {
                return Err(RouteError::PartialTemplate {
                    path: path.to_string(),
                    segment: segment.to_string(),
                });
            }
            segments.push(format!("{{p{captures}}}"));
            captures += 1;
        } else if segment.contains(['{', '}']) {
            return Err(RouteError::PartialTemplate {
                path: path.to_string(),
                segment: segment.to_string(),
            });
        } else if segment.starts_with([':', '*']) {
            return Err(RouteError::LegacyCapture {
                path: path.to_string(),
                segment: segment.to_string(),
            });
        } else {
            segments.push(segment.to_string());
        }
    }

    Ok(segments.join("/"))
}

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::http::{Method, Uri};

use specmock_api::Record;

use crate::AppState;
use crate::error::ApiError;

// ═══════════════════════════════════════════════════════════════
//  POST <path>
// ═══════════════════════════════════════════════════════════════

/// Store any well-formed JSON body under the bound contract path.
pub(crate) async fn create(
    state: AppState,
    path: Arc<str>,
    body: Bytes,
) -> Result<Json<Record>, ApiError> {
    let payload: serde_json::Value =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let record = state.store.create(&path, payload).await?;
    tracing::debug!(path = %path, identity = record.identity, "record created");
    Ok(Json(record))
}

// ═══════════════════════════════════════════════════════════════
//  GET <path>
// ═══════════════════════════════════════════════════════════════

pub(crate) async fn list(state: AppState, path: Arc<str>) -> Result<Json<Vec<Record>>, ApiError> {
    let records = state.store.list_by_path(&path).await?;
    tracing::debug!(path = %path, count = records.len(), "records listed");
    Ok(Json(records))
}

pub(crate) async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound(format!("{method} {}", uri.path()))
}

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use specmock_api::StoreError;

/// Contract path that cannot be turned into a route.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("path '{0}' must start with '/'")]
    NotAbsolute(String),

    #[error("path '{path}': segment '{segment}' mixes literal text and a template")]
    PartialTemplate { path: String, segment: String },

    #[error("path '{path}': empty template in segment '{segment}'")]
    EmptyTemplate { path: String, segment: String },

    #[error("path '{path}': segment '{segment}' uses ':'/'*' capture syntax, write '{{name}}' instead")]
    LegacyCapture { path: String, segment: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serve: {0}")]
    Serve(#[source] std::io::Error),
}

/// Per-request failure, rendered as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid json body: {0}")]
    BadRequest(String),

    #[error("no route for {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

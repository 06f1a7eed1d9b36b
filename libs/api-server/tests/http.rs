use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::{Value, json};
use tower::ServiceExt;

use specmock_api::{Record, RecordStore, StoreError, StoreFuture};
use specmock_api_server::{RouteError, build_router};
use specmock_contract::{ContractDocument, Method};
use specmock_storage_memory::MemoryStore;

fn widgets_contract() -> ContractDocument {
    ContractDocument::from_paths([
        ("/widgets", vec![Method::Post, Method::Get]),
        ("/gadgets", vec![Method::Post, Method::Get]),
        ("/reports", vec![Method::Get]),
        ("/widgets/{id}", vec![Method::Get, Method::Post]),
        ("/legacy", vec![Method::Delete, Method::Put]),
    ])
    .unwrap()
}

fn app_with(store: Arc<dyn RecordStore>) -> Router {
    build_router(&widgets_contract(), store).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap_or_else(|err| panic!("failed to build request: {err}"));

    match app.clone().oneshot(request).await {
        Ok(response) => response,
        Err(err) => panic!("router request failed: {err}"),
    }
}

async fn response_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn post_then_get_replays_the_record() {
    let app = app_with(Arc::new(MemoryStore::new()));

    let created = send(&app, "POST", "/widgets", Some(r#"{"name":"bolt"}"#)).await;
    assert_eq!(created.status(), StatusCode::OK);
    let created = response_json(created).await;
    assert_eq!(created["path"], "/widgets");
    assert_eq!(created["payload"], json!({"name": "bolt"}));
    assert!(created["identity"].as_u64().is_some_and(|id| id >= 1));

    let listed = send(&app, "GET", "/widgets", None).await;
    assert_eq!(listed.status(), StatusCode::OK);
    let listed = response_json(listed).await;
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn get_on_fresh_path_is_an_empty_array() {
    let app = app_with(Arc::new(MemoryStore::new()));
    let response = send(&app, "GET", "/reports", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!([]));
}

#[tokio::test]
async fn records_are_isolated_per_path() {
    let app = app_with(Arc::new(MemoryStore::new()));
    send(&app, "POST", "/widgets", Some(r#"{"kind":"widget"}"#)).await;
    send(&app, "POST", "/gadgets", Some(r#"{"kind":"gadget"}"#)).await;

    let gadgets = response_json(send(&app, "GET", "/gadgets", None).await).await;
    let gadgets = gadgets.as_array().unwrap();
    assert_eq!(gadgets.len(), 1);
    assert_eq!(gadgets[0]["payload"]["kind"], "gadget");
}

#[tokio::test]
async fn any_json_value_is_accepted() {
    let app = app_with(Arc::new(MemoryStore::new()));
    for body in [r#"[1,2,3]"#, r#""plain""#, "42", "null"] {
        let response = send(&app, "POST", "/widgets", Some(body)).await;
        assert_eq!(response.status(), StatusCode::OK, "body {body}");
    }
    let listed = response_json(send(&app, "GET", "/widgets", None).await).await;
    let payloads: Vec<Value> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["payload"].clone())
        .collect();
    assert_eq!(payloads, vec![json!([1, 2, 3]), json!("plain"), json!(42), Value::Null]);
}

#[tokio::test]
async fn malformed_body_is_rejected_without_storing() {
    let store = MemoryStore::new();
    let app = app_with(Arc::new(store.clone()));

    for body in [r#"{"name": "bolt""#, "", "not json"] {
        let response = send(&app, "POST", "/widgets", Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body:?}");
        let error = response_json(response).await;
        assert!(error["error"].as_str().is_some_and(|m| !m.is_empty()));
    }
    assert!(store.list_by_path("/widgets").await.unwrap().is_empty());
}

#[tokio::test]
async fn body_is_parsed_regardless_of_content_type() {
    let app = app_with(Arc::new(MemoryStore::new()));
    let request = Request::builder()
        .method("POST")
        .uri("/widgets")
        .header("content-type", "text/plain")
        .body(Body::from(r#"{"name":"nut"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn undeclared_method_is_rejected_by_the_router() {
    let store = MemoryStore::new();
    let app = app_with(Arc::new(store.clone()));

    let response = send(&app, "POST", "/reports", Some(r#"{"x":1}"#)).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(store.list_by_path("/reports").await.unwrap().is_empty());

    let response = send(&app, "DELETE", "/widgets", None).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn paths_with_only_unsupported_methods_are_not_routed() {
    let app = app_with(Arc::new(MemoryStore::new()));
    let response = send(&app, "DELETE", "/legacy", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "GET", "/undeclared", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = response_json(response).await;
    assert_eq!(error["error"], "no route for GET /undeclared");
}

#[tokio::test]
async fn templated_path_is_one_bucket() {
    let app = app_with(Arc::new(MemoryStore::new()));

    let created = response_json(send(&app, "POST", "/widgets/1", Some(r#"{"n":1}"#)).await).await;
    assert_eq!(created["path"], "/widgets/{id}");
    send(&app, "POST", "/widgets/2", Some(r#"{"n":2}"#)).await;

    let listed = response_json(send(&app, "GET", "/widgets/anything", None).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);

    // the collection path is a different bucket
    let collection = response_json(send(&app, "GET", "/widgets", None).await).await;
    assert_eq!(collection, json!([]));
}

// ── Store failures ──

struct BrokenStore;

impl RecordStore for BrokenStore {
    fn backend(&self) -> &'static str {
        "broken"
    }

    fn init(&self) -> StoreFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }

    fn create(&self, _path: &str, _payload: Value) -> StoreFuture<'_, Record> {
        Box::pin(async { Err(StoreError::backend("disk full")) })
    }

    fn list_by_path(&self, _path: &str) -> StoreFuture<'_, Vec<Record>> {
        Box::pin(async { Err(StoreError::backend("database is locked")) })
    }
}

#[tokio::test]
async fn store_failures_are_server_errors() {
    let app = app_with(Arc::new(BrokenStore));

    let response = send(&app, "POST", "/widgets", Some(r#"{"name":"bolt"}"#)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response_json(response).await, json!({"error": "store backend: disk full"}));

    let response = send(&app, "GET", "/widgets", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response_json(response).await,
        json!({"error": "store backend: database is locked"})
    );
}

#[tokio::test]
async fn malformed_body_wins_over_store_failure() {
    let app = app_with(Arc::new(BrokenStore));
    let response = send(&app, "POST", "/widgets", Some("{")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn colon_capture_contract_is_refused_before_serving() {
    let contract = ContractDocument::from_paths([
        ("/files", vec![Method::Get]),
        ("/files/:id", vec![Method::Get, Method::Post]),
    ])
    .unwrap();
    match build_router(&contract, Arc::new(MemoryStore::new())) {
        Err(RouteError::LegacyCapture { segment, .. }) => assert_eq!(segment, ":id"),
        Err(other) => panic!("unexpected route error: {other}"),
        Ok(_) => panic!("router built from a ':' capture path"),
    }
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use parkval_api::config::ServerConfig;
use parkval_api::router::build_app_router;
use parkval_api::state::AppState;
use parkval_core::status::StatusVocabulary;
use parkval_core::types::ValidationRecord;
use parkval_store::MemoryStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin and the default vocabulary.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        vocabulary: StatusVocabulary::default(),
    }
}

/// Build the full application router backed by `store`.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let state = AppState {
        store,
        config: Arc::new(test_config()),
    };
    build_app_router(state).unwrap()
}

/// A store seeded with `records`, shared so tests can inspect writes.
pub fn seeded_store(records: Vec<ValidationRecord>) -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_records(records))
}

pub fn record(plate: &str, status: &str, last_updated: &str) -> ValidationRecord {
    ValidationRecord::new(plate, status, last_updated)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri).await
}

async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

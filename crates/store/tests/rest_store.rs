//! Integration tests for [`RestStore`] against an in-process fake of the
//! realtime-database REST endpoints.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use parkval_core::types::{ValidationDocument, ValidationRecord};
use parkval_store::{RestStore, StoreConfig, StoreError, ValidationStore};

const SECRET: &str = "s3cret";

#[derive(Default)]
struct Fake {
    validations: Value,
    written: Option<Value>,
    puts: usize,
}

type Shared = Arc<Mutex<Fake>>;

fn authorized(query: &HashMap<String, String>) -> bool {
    query.get("auth").map(String::as_str) == Some(SECRET)
}

fn denied() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Permission denied" })),
    )
        .into_response()
}

async fn get_root(Query(query): Query<HashMap<String, String>>) -> Response {
    if !authorized(&query) {
        return denied();
    }
    Json(json!({ "parkingValidation": null })).into_response()
}

async fn get_validations(
    State(fake): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&query) {
        return denied();
    }
    let body = fake.lock().unwrap().validations.clone();
    Json(body).into_response()
}

async fn put_document(
    State(fake): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&query) {
        return denied();
    }
    let mut fake = fake.lock().unwrap();
    fake.written = Some(body.clone());
    fake.puts += 1;
    Json(body).into_response()
}

async fn broken() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "kaput").into_response()
}

/// Start the fake on an ephemeral port and return its base URL.
async fn spawn_fake(fake: Shared) -> String {
    let app = Router::new()
        .route("/.json", get(get_root))
        .route("/parkingValidation/validations.json", get(get_validations))
        .route("/parkingValidation.json", axum::routing::put(put_document))
        .route("/broken/validations.json", get(broken))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn store(base_url: &str, secret: Option<&str>) -> RestStore {
    RestStore::new(StoreConfig::new(base_url, secret.map(str::to_string))).unwrap()
}

// ---------------------------------------------------------------------------
// Test: ping succeeds with the secret and is denied without it
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ping_requires_secret() {
    let base = spawn_fake(Shared::default()).await;

    store(&base, Some(SECRET)).ping().await.expect("ping");
    assert_matches!(
        store(&base, None).ping().await,
        Err(StoreError::PermissionDenied { status: 401 })
    );
    assert_matches!(
        store(&base, Some("wrong")).ping().await,
        Err(StoreError::PermissionDenied { .. })
    );
}

// ---------------------------------------------------------------------------
// Test: fetch handles the node shapes the database returns
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_reads_array_object_and_null_nodes() {
    let fake = Shared::default();
    let base = spawn_fake(Arc::clone(&fake)).await;
    let client = store(&base, Some(SECRET));

    assert!(client.fetch_validations().await.unwrap().is_empty());

    fake.lock().unwrap().validations = json!([
        { "licensePlate": "A", "status": "유효", "rowIndex": 2, "lastUpdated": "2024-01-01T00:00:00Z" },
        null,
        { "licensePlate": "B", "status": "무효", "rowIndex": 4, "lastUpdated": "2024-01-01T00:00:00Z" },
    ]);
    let records = client.fetch_validations().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].row_index, Some(2));

    fake.lock().unwrap().validations = json!({
        "1": { "licensePlate": "C", "status": "직원차량" },
    });
    let records = client.fetch_validations().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].license_plate, "C");
}

// ---------------------------------------------------------------------------
// Test: replace_all PUTs the whole document in one request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn replace_all_puts_full_document() {
    let fake = Shared::default();
    let base = spawn_fake(Arc::clone(&fake)).await;
    let client = store(&base, Some(SECRET));

    let now = Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap();
    let doc = ValidationDocument::new(
        vec![ValidationRecord::new("A", "유효", "2024-01-01T00:00:00Z")],
        "google-sheets",
        now,
    );
    client.replace_all(&doc).await.expect("write");

    let fake = fake.lock().unwrap();
    assert_eq!(fake.puts, 1);
    let written = fake.written.as_ref().unwrap();
    assert_eq!(written["validations"][0]["licensePlate"], "A");
    assert_eq!(written["metadata"]["totalRecords"], 1);
    assert_eq!(written["metadata"]["source"], "google-sheets");
    assert_eq!(written["metadata"]["lastModified"], now.timestamp_millis());
    assert_eq!(written["metadata"]["lastSync"], "2024-02-03T04:05:06.000Z");
}

// ---------------------------------------------------------------------------
// Test: a denied write leaves the fake untouched
// ---------------------------------------------------------------------------

#[tokio::test]
async fn denied_write_changes_nothing() {
    let fake = Shared::default();
    let base = spawn_fake(Arc::clone(&fake)).await;

    let doc = ValidationDocument::new(Vec::new(), "google-sheets", Utc::now());
    assert_matches!(
        store(&base, None).replace_all(&doc).await,
        Err(StoreError::PermissionDenied { .. })
    );
    assert_eq!(fake.lock().unwrap().puts, 0);
}

// ---------------------------------------------------------------------------
// Test: other failures keep status and body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_error_is_reported_with_body() {
    let base = spawn_fake(Shared::default()).await;
    let mut config = StoreConfig::new(&base, Some(SECRET.to_string()));
    config.root = "broken".to_string();
    let client = RestStore::new(config).unwrap();

    let err = client.fetch_validations().await.unwrap_err();
    assert_matches!(&err, StoreError::Api { status: 500, body } if body == "kaput");
}

// ---------------------------------------------------------------------------
// Test: transport errors do not leak the secret
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transport_error_hides_secret() {
    // Nothing listens on port 9 (discard) on a test host.
    let client = store("http://127.0.0.1:9", Some(SECRET));
    let err = client.ping().await.unwrap_err();
    assert_matches!(err, StoreError::Request(_));
    assert!(!err.to_string().contains(SECRET));
}

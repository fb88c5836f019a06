//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use parkval_api::error::AppError;
use parkval_core::status::StatusVocabulary;
use parkval_store::StoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: an invalid vocabulary maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn vocabulary_error_returns_400() {
    let core = StatusVocabulary::from_lists(Some(" , "), None).unwrap_err();
    let (status, json) = error_to_response(AppError::Core(core)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

// ---------------------------------------------------------------------------
// Test: store permission denial maps to 403
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_permission_denied_returns_403() {
    let err = AppError::Store(StoreError::PermissionDenied { status: 401 });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

// ---------------------------------------------------------------------------
// Test: upstream failures map to 502 without echoing the upstream body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_api_error_returns_502_and_hides_body() {
    let err = AppError::Store(StoreError::Api {
        status: 500,
        body: "stack trace with internals".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "STORE_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("internals"));
}

// ---------------------------------------------------------------------------
// Test: store misconfiguration is an internal error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_config_error_returns_500() {
    let err = AppError::Store(StoreError::Config("FIREBASE_URL must be set".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

// ---------------------------------------------------------------------------
// Test: a malformed CORS origin is rejected when building the router
// ---------------------------------------------------------------------------

#[test]
fn invalid_cors_origin_is_a_bad_request() {
    let config = parkval_api::config::ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["not a\norigin".to_string()],
        request_timeout_secs: 30,
        vocabulary: StatusVocabulary::default(),
    };

    let err = parkval_api::router::build_cors_layer(&config).unwrap_err();
    assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("Invalid CORS origin")));
}

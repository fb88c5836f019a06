use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parkval_core::error::CoreError;
use parkval_store::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`StoreError`].
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `parkval_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The remote store failed or refused the request.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - A refused credential maps to 403.
/// - Configuration problems are ours and map to 500.
/// - Everything else is an upstream failure and maps to 502; the upstream
///   body is logged, never returned.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::PermissionDenied { status } => {
            tracing::warn!(upstream_status = status, "Store denied access");
            (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "The validation store denied access".to_string(),
            )
        }
        StoreError::Config(msg) => {
            tracing::error!(error = %msg, "Store misconfigured");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Store request failed");
            (
                StatusCode::BAD_GATEWAY,
                "STORE_ERROR",
                "The validation store request failed".to_string(),
            )
        }
    }
}

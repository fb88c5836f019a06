pub mod admin;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/issues                  duplicate and conflict report (GET)
/// /admin/cleanup/preview         dry-run cleanup with decisions (GET)
/// /admin/cleanup                 dedupe and write back (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/admin", admin::router())
}

//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /issues             -> scan_issues
/// GET    /cleanup/preview    -> preview_cleanup
/// POST   /cleanup            -> run_cleanup
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/issues", get(admin::scan_issues))
        .route("/cleanup/preview", get(admin::preview_cleanup))
        .route("/cleanup", post(admin::run_cleanup))
}

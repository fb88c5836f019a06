//! Handlers for the `/admin` resource (issue report and cleanup).
//!
//! Every handler reads the full record set from the store. Cleanup writes
//! the deduplicated set back as one full replacement.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use parkval_core::cleanup::{plan_cleanup_with_observer, CleanupSummary};
use parkval_core::decision::{RecordedDecision, RecordingObserver, TracingObserver};
use parkval_core::issues::{scan, IssueScan};
use parkval_core::types::SOURCE_ADMIN_CLEANUP;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response body for `GET /admin/cleanup/preview`.
#[derive(Debug, Serialize)]
pub struct CleanupPreview {
    pub summary: CleanupSummary,
    /// Decisions that replaced or discarded a record, in input order.
    pub decisions: Vec<RecordedDecision>,
}

/// Response body for `POST /admin/cleanup`.
#[derive(Debug, Serialize)]
pub struct CleanupResult {
    pub summary: CleanupSummary,
    /// Whether the cleaned document was written back.
    pub written: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/issues
///
/// Report every plate that appears more than once.
pub async fn scan_issues(State(state): State<AppState>) -> AppResult<Json<DataResponse<IssueScan>>> {
    let records = state.store.fetch_validations().await?;
    let report = scan(&records, &state.config.vocabulary);

    tracing::info!(
        total_records = report.total_records,
        conflicts = report.conflict_count,
        duplicates = report.duplicate_count,
        "Issue scan complete"
    );

    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/admin/cleanup/preview
///
/// Compute the cleanup without writing and list the decisions that change
/// the record set.
pub async fn preview_cleanup(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<CleanupPreview>>> {
    let records = state.store.fetch_validations().await?;

    let mut recorder = RecordingObserver::new();
    let plan = plan_cleanup_with_observer(&records, &state.config.vocabulary, &mut recorder);
    let decisions = recorder.changes().cloned().collect();

    Ok(Json(DataResponse {
        data: CleanupPreview {
            summary: plan.summary,
            decisions,
        },
    }))
}

/// POST /api/v1/admin/cleanup
///
/// Re-read the store and, only when issues exist, write the deduplicated
/// document back tagged `admin-cleanup`.
pub async fn run_cleanup(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<CleanupResult>>> {
    let records = state.store.fetch_validations().await?;
    let vocab = &state.config.vocabulary;

    let report = scan(&records, vocab);
    let plan = plan_cleanup_with_observer(&records, vocab, TracingObserver);
    let summary = plan.summary;

    if !report.cleanup_enabled {
        tracing::info!(total_records = records.len(), "No issues found, nothing to clean");
        return Ok(Json(DataResponse {
            data: CleanupResult {
                summary,
                written: false,
            },
        }));
    }

    let document = plan.into_document(SOURCE_ADMIN_CLEANUP, Utc::now());
    state.store.replace_all(&document).await?;

    tracing::info!(
        original = summary.original_count,
        cleaned = summary.cleaned_count,
        removed = summary.removed_count,
        "Cleanup written"
    );

    Ok(Json(DataResponse {
        data: CleanupResult {
            summary,
            written: true,
        },
    }))
}

//! Sync, check, init and scan operations.

use parkval_core::cleanup::{plan_cleanup_with_observer, CleanupSummary};
use parkval_core::decision::TracingObserver;
use parkval_core::issues::{scan, IssueScan};
use parkval_core::status::StatusVocabulary;
use parkval_core::types::{Timestamp, ValidationDocument, ValidationRecord, SOURCE_GOOGLE_SHEETS};
use parkval_sheets::SheetSource;
use parkval_store::ValidationStore;

use crate::error::SyncError;

/// How a sync pass treats the records it read.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Deduplicate before writing.
    pub clean: bool,
    /// Build the document but do not write it.
    pub dry_run: bool,
    /// Tag stored in `metadata.source`.
    pub source: String,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            clean: false,
            dry_run: false,
            source: SOURCE_GOOGLE_SHEETS.to_string(),
        }
    }
}

/// Result of one sync pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The sheet had no data rows; nothing was written.
    NoData,
    /// The document that would have been written.
    DryRun {
        document: ValidationDocument,
        cleanup: Option<CleanupSummary>,
    },
    Written {
        total_records: usize,
        cleanup: Option<CleanupSummary>,
    },
}

/// Write `records` to the store as a full replacement.
///
/// With `options.clean` the records are deduplicated first. Zero records is
/// treated as "no data" so an empty export never wipes the store.
pub async fn sync_records(
    records: Vec<ValidationRecord>,
    store: &dyn ValidationStore,
    vocab: &StatusVocabulary,
    options: &SyncOptions,
    now: Timestamp,
) -> Result<SyncOutcome, SyncError> {
    if records.is_empty() {
        tracing::info!("No data to sync (only header row exists)");
        return Ok(SyncOutcome::NoData);
    }

    let (records, cleanup) = if options.clean {
        let plan = plan_cleanup_with_observer(&records, vocab, TracingObserver);
        tracing::info!(
            original = plan.summary.original_count,
            cleaned = plan.summary.cleaned_count,
            removed = plan.summary.removed_count,
            "Deduplicated records before sync"
        );
        (plan.cleaned, Some(plan.summary))
    } else {
        (records, None)
    };

    let document = ValidationDocument::new(records, options.source.as_str(), now);

    if options.dry_run {
        tracing::info!(
            total_records = document.metadata.total_records,
            source = %document.metadata.source,
            "Dry run, skipping write"
        );
        return Ok(SyncOutcome::DryRun { document, cleanup });
    }

    store.replace_all(&document).await?;
    tracing::info!(
        total_records = document.metadata.total_records,
        "Sync completed successfully"
    );

    Ok(SyncOutcome::Written {
        total_records: document.metadata.total_records,
        cleanup,
    })
}

/// Read `source` and sync its records, stamped with `now`.
pub async fn sync_sheet(
    source: &SheetSource,
    store: &dyn ValidationStore,
    vocab: &StatusVocabulary,
    options: &SyncOptions,
    now: Timestamp,
) -> Result<SyncOutcome, SyncError> {
    let records = source.read_records(now)?;
    sync_records(records, store, vocab, options, now).await
}

/// Verify the store is reachable with the configured credentials.
pub async fn check(store: &dyn ValidationStore) -> Result<(), SyncError> {
    match store.ping().await {
        Ok(()) => {
            tracing::info!("Store connection successful");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Store connection failed");
            Err(e.into())
        }
    }
}

/// First-time setup: check the connection, then run an initial sync.
///
/// Dry runs write nothing, so the connection check is skipped.
pub async fn init(
    source: &SheetSource,
    store: &dyn ValidationStore,
    vocab: &StatusVocabulary,
    options: &SyncOptions,
    now: Timestamp,
) -> Result<SyncOutcome, SyncError> {
    if options.dry_run {
        tracing::info!("Dry run, skipping connection check");
    } else {
        check(store).await?;
        tracing::info!("Connection test passed, performing initial sync");
    }
    let outcome = sync_sheet(source, store, vocab, options, now).await?;
    tracing::info!("Initialization complete");
    Ok(outcome)
}

/// Fetch the stored records and report their issues.
pub async fn scan_store(
    store: &dyn ValidationStore,
    vocab: &StatusVocabulary,
) -> Result<IssueScan, SyncError> {
    let records = store.fetch_validations().await?;
    Ok(scan(&records, vocab))
}

//! A cleanup pass: dedupe a full record set and describe what it removes.
//!
//! The plan is computed entirely in memory. Callers write
//! [`CleanupPlan::into_document`] back as a single full replacement, so a
//! failed write leaves the remote state as it was.

use serde::Serialize;

use crate::decision::{DecisionObserver, NoopObserver};
use crate::dedup::clean_with_observer;
use crate::status::StatusVocabulary;
use crate::types::{Timestamp, ValidationDocument, ValidationRecord};

/// Record counts before and after a cleanup pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupSummary {
    pub original_count: usize,
    pub cleaned_count: usize,
    /// Includes records dropped for a blank plate.
    pub removed_count: usize,
}

/// The cleaned records and their summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupPlan {
    pub cleaned: Vec<ValidationRecord>,
    pub summary: CleanupSummary,
}

impl CleanupPlan {
    /// Envelope for writing the cleaned set back.
    pub fn into_document(self, source: &str, now: Timestamp) -> ValidationDocument {
        ValidationDocument::new(self.cleaned, source, now)
    }
}

pub fn plan_cleanup(records: &[ValidationRecord], vocab: &StatusVocabulary) -> CleanupPlan {
    plan_cleanup_with_observer(records, vocab, NoopObserver)
}

pub fn plan_cleanup_with_observer<O: DecisionObserver>(
    records: &[ValidationRecord],
    vocab: &StatusVocabulary,
    observer: O,
) -> CleanupPlan {
    let cleaned = clean_with_observer(records, vocab, observer);
    let summary = CleanupSummary {
        original_count: records.len(),
        cleaned_count: cleaned.len(),
        removed_count: records.len() - cleaned.len(),
    };
    CleanupPlan { cleaned, summary }
}

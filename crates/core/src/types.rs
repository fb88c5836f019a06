//! Record and document shapes shared by every crate in the workspace.
//!
//! Field names serialize in camelCase because the remote store and the
//! spreadsheet sync both use that layout.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// All timestamps are UTC.
pub type Timestamp = DateTime<Utc>;

/// Source tag written by the spreadsheet sync.
pub const SOURCE_GOOGLE_SHEETS: &str = "google-sheets";

/// Source tag written by an admin cleanup pass.
pub const SOURCE_ADMIN_CLEANUP: &str = "admin-cleanup";

// ---------------------------------------------------------------------------
// ValidationRecord
// ---------------------------------------------------------------------------

/// One submitted claim that a license plate is parked validly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRecord {
    /// Dedup key. Trimmed, case-sensitive.
    #[serde(default)]
    pub license_plate: String,
    /// Raw status label as submitted (e.g. `"유효"`, `"직원차량"`, `""`).
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// 1-based source row. Provenance only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,
    /// ISO-8601 string; only used as a tiebreak.
    #[serde(default)]
    pub last_updated: String,
}

impl ValidationRecord {
    /// Build a record with no submitter or row provenance.
    pub fn new(
        license_plate: impl Into<String>,
        status: impl Into<String>,
        last_updated: impl Into<String>,
    ) -> Self {
        Self {
            license_plate: license_plate.into(),
            status: status.into(),
            user_id: None,
            row_index: None,
            last_updated: last_updated.into(),
        }
    }

    /// The grouping key, or `None` when the plate is blank.
    pub fn plate_key(&self) -> Option<&str> {
        let plate = self.license_plate.trim();
        (!plate.is_empty()).then_some(plate)
    }

    /// Parsed `last_updated`, or `None` when it is not a recognisable timestamp.
    pub fn updated_at(&self) -> Option<Timestamp> {
        parse_timestamp(&self.last_updated)
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (with offset) and a bare `YYYY-MM-DDTHH:MM:SS[.fff]`
/// which is read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a timestamp the way the store expects (`2024-01-01T00:00:00.000Z`).
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

// ---------------------------------------------------------------------------
// Document envelope
// ---------------------------------------------------------------------------

/// Metadata stored next to the validations on every full replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMetadata {
    pub total_records: usize,
    /// ISO-8601 time of the write.
    pub last_sync: String,
    /// Epoch milliseconds of the write, polled by clients for change detection.
    pub last_modified: i64,
    pub source: String,
}

/// The complete remote state. Every write replaces it as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDocument {
    pub validations: Vec<ValidationRecord>,
    pub metadata: SyncMetadata,
}

impl ValidationDocument {
    /// Wrap `validations` in an envelope stamped at `now`.
    pub fn new(validations: Vec<ValidationRecord>, source: impl Into<String>, now: Timestamp) -> Self {
        let metadata = SyncMetadata {
            total_records: validations.len(),
            last_sync: format_timestamp(&now),
            last_modified: now.timestamp_millis(),
            source: source.into(),
        };
        Self {
            validations,
            metadata,
        }
    }
}

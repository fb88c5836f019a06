//! Issue detection: which plates have more than one record, and whether
//! those records disagree on validity.
//!
//! Only the binary valid / not-valid split matters here; the recency and
//! permanent-over-temporary rules of [`crate::dedup`] are not consulted.

use indexmap::IndexMap;
use serde::Serialize;

use crate::status::StatusVocabulary;
use crate::types::ValidationRecord;

/// Kind of problem found for a plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueKind {
    /// At least one valid and at least one invalid record.
    Conflict,
    /// Several records, all on the same side of valid / invalid.
    Duplicate,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conflict => "Conflict",
            Self::Duplicate => "Duplicate",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All records sharing one plate, plus the kind of issue they form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlateIssue {
    pub plate: String,
    /// Records in input order.
    pub records: Vec<ValidationRecord>,
    #[serde(rename = "type")]
    pub kind: IssueKind,
}

/// Issues plus the counts the admin report needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueScan {
    pub issues: Vec<PlateIssue>,
    pub total_records: usize,
    pub conflict_count: usize,
    pub duplicate_count: usize,
    /// Cleanup is only offered when something was found.
    pub cleanup_enabled: bool,
}

/// Group records by plate and report every plate with two or more records.
///
/// Blank plates are excluded. Issues come out in order of each plate's first
/// appearance.
pub fn find_issues(records: &[ValidationRecord], vocab: &StatusVocabulary) -> Vec<PlateIssue> {
    let mut groups: IndexMap<&str, Vec<&ValidationRecord>> = IndexMap::new();
    for record in records {
        if let Some(plate) = record.plate_key() {
            groups.entry(plate).or_default().push(record);
        }
    }

    groups
        .into_iter()
        .filter(|(_, group)| group.len() > 1)
        .map(|(plate, group)| {
            let has_valid = group.iter().any(|r| vocab.is_valid(&r.status));
            let has_invalid = group.iter().any(|r| !vocab.is_valid(&r.status));
            let kind = if has_valid && has_invalid {
                IssueKind::Conflict
            } else {
                IssueKind::Duplicate
            };
            PlateIssue {
                plate: plate.to_string(),
                records: group.into_iter().cloned().collect(),
                kind,
            }
        })
        .collect()
}

/// Run [`find_issues`] and summarise the result.
pub fn scan(records: &[ValidationRecord], vocab: &StatusVocabulary) -> IssueScan {
    let issues = find_issues(records, vocab);
    let conflict_count = issues
        .iter()
        .filter(|i| i.kind == IssueKind::Conflict)
        .count();
    IssueScan {
        total_records: records.len(),
        conflict_count,
        duplicate_count: issues.len() - conflict_count,
        cleanup_enabled: !issues.is_empty(),
        issues,
    }
}

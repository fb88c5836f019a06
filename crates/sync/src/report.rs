//! Plain-text rendering of an [`IssueScan`].

use std::fmt;

use parkval_core::issues::IssueScan;

/// Terminal view of an [`IssueScan`].
///
/// ```text
/// Validation records: 5
/// Issues: 2 (1 conflict, 1 duplicate)
///
/// [Duplicate] A (2 records)
///   row 2    유효        2024-01-01T00:00:00Z
/// ```
pub struct IssueReport<'a>(pub &'a IssueScan);

impl fmt::Display for IssueReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scan = self.0;
        writeln!(f, "Validation records: {}", scan.total_records)?;

        if scan.issues.is_empty() {
            return writeln!(f, "No issues found.");
        }

        writeln!(
            f,
            "Issues: {} ({} conflict, {} duplicate)",
            scan.issues.len(),
            scan.conflict_count,
            scan.duplicate_count
        )?;

        for issue in &scan.issues {
            writeln!(f)?;
            writeln!(f, "[{}] {} ({} records)", issue.kind, issue.plate, issue.records.len())?;
            for record in &issue.records {
                let row = record
                    .row_index
                    .map(|r| format!("row {r}"))
                    .unwrap_or_else(|| "row ?".to_string());
                let status = match record.status.trim() {
                    "" => "(blank)",
                    s => s,
                };
                writeln!(f, "  {row:<8} {status:<10} {}", record.last_updated)?;
            }
        }

        Ok(())
    }
}

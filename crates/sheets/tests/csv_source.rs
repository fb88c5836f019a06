//! Integration tests for reading validation records from CSV exports.

use std::io::Write;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use parkval_sheets::{SheetError, SheetSource, DEFAULT_SHEET_NAME};

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    file.write_all(contents.as_bytes()).expect("write temp csv");
    file
}

// ---------------------------------------------------------------------------
// Test: rows map to records with provenance and a shared read timestamp
// ---------------------------------------------------------------------------

#[test]
fn csv_rows_become_stamped_records() {
    let file = write_csv(
        "Timestamp,LicensePlate,Status,UserID\n\
         2024-01-01,12가3456,유효,alice\n\
         2024-01-02,34나5678,직원차량,\n\
         2024-01-03,,유효,bob\n\
         2024-01-04,56다7890,,carol\n",
    );
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();

    let records = SheetSource::new(file.path(), DEFAULT_SHEET_NAME)
        .read_records(now)
        .expect("read csv");

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].license_plate, "12가3456");
    assert_eq!(records[0].user_id.as_deref(), Some("alice"));
    assert_eq!(records[0].row_index, Some(2));
    assert_eq!(records[1].status, "직원차량");
    assert_eq!(records[1].user_id, None);
    assert_eq!(records[2].row_index, Some(5));
    assert_eq!(records[2].status, "");
    assert!(records
        .iter()
        .all(|r| r.last_updated == "2024-05-01T10:00:00.000Z"));
}

// ---------------------------------------------------------------------------
// Test: a header-only export is not an error
// ---------------------------------------------------------------------------

#[test]
fn header_only_csv_yields_no_records() {
    let file = write_csv("LicensePlate,Status\n");
    let records = SheetSource::new(file.path(), DEFAULT_SHEET_NAME)
        .read_records(Utc::now())
        .expect("read csv");
    assert!(records.is_empty());
}

// ---------------------------------------------------------------------------
// Test: missing required columns are reported, not skipped
// ---------------------------------------------------------------------------

#[test]
fn csv_without_status_column_fails() {
    let file = write_csv("LicensePlate,Note\nA,hello\n");
    let result = SheetSource::new(file.path(), DEFAULT_SHEET_NAME).read_records(Utc::now());
    assert_matches!(result, Err(SheetError::MissingColumns(cols)) if cols == vec!["Status".to_string()]);
}

// ---------------------------------------------------------------------------
// Test: ragged rows are tolerated
// ---------------------------------------------------------------------------

#[test]
fn short_rows_are_read() {
    let file = write_csv("LicensePlate,Status,UserID\nA1,유효\nB2\n");
    let records = SheetSource::new(file.path(), DEFAULT_SHEET_NAME)
        .read_records(Utc::now())
        .expect("read csv");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].status, "");
}

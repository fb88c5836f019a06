//! Spreadsheet file access.
//!
//! Workbooks (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) are read with
//! calamine from the named worksheet; `.csv` files are read with the csv
//! crate. Both are flattened to string rows before mapping.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use parkval_core::types::{format_timestamp, Timestamp, ValidationRecord};

use crate::columns::rows_to_records;
use crate::error::SheetError;

/// Worksheet the form responses are collected in.
pub const DEFAULT_SHEET_NAME: &str = "ValidationsTab";

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// A spreadsheet file plus the worksheet to read from it.
///
/// `sheet_name` is ignored for CSV files.
#[derive(Debug, Clone)]
pub struct SheetSource {
    pub path: PathBuf,
    pub sheet_name: String,
}

impl SheetSource {
    pub fn new(path: impl Into<PathBuf>, sheet_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet_name: sheet_name.into(),
        }
    }

    /// Read every row, header included, as untrimmed strings.
    pub fn read_rows(&self) -> Result<Vec<Vec<String>>, SheetError> {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if ext == "csv" {
            read_csv_rows(&self.path)
        } else if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
            read_workbook_rows(&self.path, &self.sheet_name)
        } else {
            Err(SheetError::UnsupportedFormat(self.path.display().to_string()))
        }
    }

    /// Read the sheet and map it to records, all stamped with `now`.
    pub fn read_records(&self, now: Timestamp) -> Result<Vec<ValidationRecord>, SheetError> {
        let rows = self.read_rows()?;
        let records = rows_to_records(&rows, &format_timestamp(&now))?;
        tracing::info!(
            path = %self.path.display(),
            rows = rows.len().saturating_sub(1),
            records = records.len(),
            "Processed validation records"
        );
        Ok(records)
    }
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn read_workbook_rows(path: &Path, sheet_name: &str) -> Result<Vec<Vec<String>>, SheetError> {
    let workbook_err = |source: calamine::Error| SheetError::Workbook {
        path: path.display().to_string(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_err)?;
    if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
        return Err(SheetError::SheetNotFound(sheet_name.to_string()));
    }

    let range = workbook.worksheet_range(sheet_name).map_err(workbook_err)?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

/// Render a cell the way it would appear in the sheet.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn whole_floats_render_without_fraction() {
        assert_eq!(cell_to_string(&Data::Float(1234.0)), "1234");
        assert_eq!(cell_to_string(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("유효".into())), "유효");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let source = SheetSource::new("validations.txt", DEFAULT_SHEET_NAME);
        assert_matches!(source.read_rows(), Err(SheetError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_workbook_is_a_workbook_error() {
        let source = SheetSource::new("/nonexistent/validations.xlsx", DEFAULT_SHEET_NAME);
        assert_matches!(source.read_rows(), Err(SheetError::Workbook { .. }));
    }
}

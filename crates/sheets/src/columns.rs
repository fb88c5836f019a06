//! Header lookup and row → record mapping.
//!
//! Works on plain string rows so the workbook and CSV readers share it.

use parkval_core::types::ValidationRecord;

use crate::error::SheetError;

pub const COLUMN_LICENSE_PLATE: &str = "LicensePlate";
pub const COLUMN_STATUS: &str = "Status";
pub const COLUMN_USER_ID: &str = "UserID";

/// Positions of the known columns in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub license_plate: usize,
    pub status: usize,
    pub user_id: Option<usize>,
}

impl ColumnMap {
    /// Locate the columns by exact (trimmed) header name.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self, SheetError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.as_ref().trim_start_matches('\u{feff}').trim() == name)
        };

        let license_plate = find(COLUMN_LICENSE_PLATE);
        let status = find(COLUMN_STATUS);

        match (license_plate, status) {
            (Some(license_plate), Some(status)) => Ok(Self {
                license_plate,
                status,
                user_id: find(COLUMN_USER_ID),
            }),
            _ => {
                let missing = [
                    (COLUMN_LICENSE_PLATE, license_plate),
                    (COLUMN_STATUS, status),
                ]
                .into_iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
                Err(SheetError::MissingColumns(missing))
            }
        }
    }
}

/// Convert sheet rows (header first) into records stamped with `stamped_at`.
///
/// Plate and status are trimmed; rows with a blank plate are skipped.
/// `row_index` is the 1-based sheet row, so the first data row is 2.
/// An empty sheet yields no records and no error.
pub fn rows_to_records(
    rows: &[Vec<String>],
    stamped_at: &str,
) -> Result<Vec<ValidationRecord>, SheetError> {
    let Some((header, data)) = rows.split_first() else {
        return Ok(Vec::new());
    };
    let columns = ColumnMap::from_headers(header.as_slice())?;

    let mut records = Vec::with_capacity(data.len());
    for (i, row) in data.iter().enumerate() {
        let cell = |idx: usize| row.get(idx).map(|c| c.trim()).unwrap_or("");

        let license_plate = cell(columns.license_plate);
        if license_plate.is_empty() {
            continue;
        }

        let user_id = columns
            .user_id
            .map(cell)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        records.push(ValidationRecord {
            license_plate: license_plate.to_string(),
            status: cell(columns.status).to_string(),
            user_id,
            row_index: u32::try_from(i + 2).ok(),
            last_updated: stamped_at.to_string(),
        });
    }

    Ok(records)
}

//! Spreadsheet source for validation records.
//!
//! Reads the form-response sheet and maps its `LicensePlate`, `Status` and
//! optional `UserID` columns onto [`parkval_core::types::ValidationRecord`].

pub mod columns;
pub mod error;
pub mod reader;

pub use error::SheetError;
pub use reader::{SheetSource, DEFAULT_SHEET_NAME};

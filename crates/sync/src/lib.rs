//! Spreadsheet to store synchronisation.
//!
//! The binary in `main.rs` is a thin clap front end over [`sync`]; the
//! operations here take any [`parkval_store::ValidationStore`] so tests can
//! run them against an in-memory store.

pub mod cli;
pub mod error;
pub mod report;
pub mod sync;

pub use error::SyncError;
pub use sync::{check, init, scan_store, sync_records, sync_sheet, SyncOptions, SyncOutcome};

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use parkval_core::error::CoreError;
use parkval_core::status::StatusVocabulary;
use parkval_core::types::SOURCE_GOOGLE_SHEETS;
use parkval_sheets::{SheetSource, DEFAULT_SHEET_NAME};

use crate::sync::SyncOptions;

#[derive(Parser, Debug)]
#[command(name = "parkval-sync")]
#[command(about = "Sync parking validations from a spreadsheet to the validation store", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub vocabulary: VocabularyArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read the sheet and replace the stored document
    Sync(SheetArgs),
    /// Test the store connection and credentials
    Check,
    /// Check the connection, then run an initial sync
    Init(SheetArgs),
    /// Report duplicate and conflicting plates in the store
    Scan,
}

/// Status labels; comma-separated, defaults apply when unset.
#[derive(Args, Debug, Clone, Default)]
pub struct VocabularyArgs {
    /// Labels counted as valid-temporary
    #[arg(long, env = "VALID_STATUSES", global = true)]
    pub valid_statuses: Option<String>,

    /// Labels counted as permanent
    #[arg(long, env = "PERMANENT_STATUSES", global = true)]
    pub permanent_statuses: Option<String>,
}

impl VocabularyArgs {
    pub fn vocabulary(&self) -> Result<StatusVocabulary, CoreError> {
        StatusVocabulary::from_lists(
            self.valid_statuses.as_deref(),
            self.permanent_statuses.as_deref(),
        )
    }
}

#[derive(Args, Debug, Clone)]
pub struct SheetArgs {
    /// Spreadsheet to read (.xlsx, .xlsm, .xlsb, .xls, .ods or .csv)
    #[arg(long = "sheet", env = "SHEET_PATH")]
    pub sheet_path: PathBuf,

    /// Worksheet holding the responses (ignored for CSV)
    #[arg(long, env = "SHEET_NAME", default_value = DEFAULT_SHEET_NAME)]
    pub sheet_name: String,

    /// Value written to metadata.source
    #[arg(long, env = "SYNC_SOURCE", default_value = SOURCE_GOOGLE_SHEETS)]
    pub source: String,

    /// Deduplicate records before writing
    #[arg(long)]
    pub clean: bool,

    /// Show what would be written without writing
    #[arg(long)]
    pub dry_run: bool,
}

impl SheetArgs {
    pub fn sheet_source(&self) -> SheetSource {
        SheetSource::new(&self.sheet_path, &self.sheet_name)
    }

    pub fn options(&self) -> SyncOptions {
        SyncOptions {
            clean: self.clean,
            dry_run: self.dry_run,
            source: self.source.clone(),
        }
    }
}

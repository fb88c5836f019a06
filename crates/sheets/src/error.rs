/// Errors from reading the validation spreadsheet.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    /// The workbook could not be opened or a worksheet could not be read.
    #[error("Failed to read workbook {path}: {source}")]
    Workbook {
        path: String,
        #[source]
        source: calamine::Error,
    },

    /// The CSV file could not be opened or parsed.
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The workbook has no sheet with the configured name.
    #[error("Sheet \"{0}\" not found")]
    SheetNotFound(String),

    /// One or more required header columns are missing.
    #[error("Required columns not found: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The file extension is not a supported spreadsheet format.
    #[error("Unsupported spreadsheet format: {0}")]
    UnsupportedFormat(String),
}

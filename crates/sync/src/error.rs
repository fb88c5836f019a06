use parkval_core::error::CoreError;
use parkval_sheets::SheetError;
use parkval_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Failed to read sheet: {0}")]
    Sheet(#[from] SheetError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

//! Remote store access for the validation document.
//!
//! [`ValidationStore`] is the seam the sync CLI and the admin API talk to.
//! [`RestStore`] speaks the realtime-database REST protocol;
//! [`MemoryStore`] keeps everything in process.

use async_trait::async_trait;
use parkval_core::types::{ValidationDocument, ValidationRecord};

pub mod config;
pub mod error;
pub mod memory;
pub mod rest;

pub use config::StoreConfig;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use rest::RestStore;

/// Read / full-replace access to the remote validation document.
///
/// Implementations never retry; a failure is returned to the caller as is.
#[async_trait]
pub trait ValidationStore: Send + Sync {
    /// All stored validation records, in stored order.
    async fn fetch_validations(&self) -> Result<Vec<ValidationRecord>, StoreError>;

    /// Replace the entire document (records and metadata) in one write.
    async fn replace_all(&self, document: &ValidationDocument) -> Result<(), StoreError>;

    /// Check that the store is reachable and accepts the credentials.
    async fn ping(&self) -> Result<(), StoreError>;
}

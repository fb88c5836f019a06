//! In-process [`ValidationStore`] for tests and dry runs.

use async_trait::async_trait;
use parkval_core::types::{ValidationDocument, ValidationRecord};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::ValidationStore;

#[derive(Debug, Default)]
struct State {
    /// Records returned by reads until the first write replaces them.
    seeded: Vec<ValidationRecord>,
    document: Option<ValidationDocument>,
    writes: usize,
    denied: bool,
}

/// Store that keeps the document in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `validations` node already holds `records`.
    pub fn with_records(records: Vec<ValidationRecord>) -> Self {
        Self {
            state: RwLock::new(State {
                seeded: records,
                ..State::default()
            }),
        }
    }

    /// Make every subsequent call fail with [`StoreError::PermissionDenied`].
    pub async fn deny_access(&self, denied: bool) {
        self.state.write().await.denied = denied;
    }

    /// The last document written, if any.
    pub async fn document(&self) -> Option<ValidationDocument> {
        self.state.read().await.document.clone()
    }

    /// Number of successful `replace_all` calls.
    pub async fn write_count(&self) -> usize {
        self.state.read().await.writes
    }
}

fn check_access(state: &State) -> Result<(), StoreError> {
    if state.denied {
        return Err(StoreError::PermissionDenied { status: 403 });
    }
    Ok(())
}

#[async_trait]
impl ValidationStore for MemoryStore {
    async fn fetch_validations(&self) -> Result<Vec<ValidationRecord>, StoreError> {
        let state = self.state.read().await;
        check_access(&state)?;
        Ok(match &state.document {
            Some(doc) => doc.validations.clone(),
            None => state.seeded.clone(),
        })
    }

    async fn replace_all(&self, document: &ValidationDocument) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        check_access(&state)?;
        state.document = Some(document.clone());
        state.writes += 1;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        check_access(&*self.state.read().await)
    }
}

use std::sync::Arc;

use parkval_store::ValidationStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Remote validation document.
    pub store: Arc<dyn ValidationStore>,
    /// Server configuration, including the status vocabulary.
    pub config: Arc<ServerConfig>,
}

/// Errors from the remote validation store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store rejected the credentials (HTTP 401 / 403).
    #[error("Permission denied by store ({status})")]
    PermissionDenied { status: u16 },

    /// The store returned another non-2xx status.
    #[error("Store error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response body was not the expected shape.
    #[error("Unexpected store response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Missing or invalid store configuration.
    #[error("Store configuration error: {0}")]
    Config(String),
}

use crate::error::StoreError;

/// Node under which the document lives.
pub const DEFAULT_ROOT: &str = "parkingValidation";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the remote store.
#[derive(Clone)]
pub struct StoreConfig {
    /// Database URL, e.g. `https://project-default-rtdb.firebaseio.com`.
    pub base_url: String,
    /// Database secret sent as the `auth` query parameter.
    pub secret: Option<String>,
    /// Root node of the validation document.
    pub root: String,
    pub timeout_secs: u64,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>, secret: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            secret: secret.filter(|s| !s.is_empty()),
            root: DEFAULT_ROOT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Default              |
    /// |----------------------|----------------------|
    /// | `FIREBASE_URL`       | required             |
    /// | `FIREBASE_SECRET`    | none                 |
    /// | `STORE_ROOT`         | `parkingValidation`  |
    /// | `STORE_TIMEOUT_SECS` | `30`                 |
    pub fn from_env() -> Result<Self, StoreError> {
        let base_url = std::env::var("FIREBASE_URL")
            .map_err(|_| StoreError::Config("FIREBASE_URL must be set".into()))?;
        if base_url.trim().is_empty() {
            return Err(StoreError::Config("FIREBASE_URL must not be empty".into()));
        }

        let mut config = Self::new(base_url.trim(), std::env::var("FIREBASE_SECRET").ok());

        if let Ok(root) = std::env::var("STORE_ROOT") {
            let root = root.trim().trim_matches('/');
            if !root.is_empty() {
                config.root = root.to_string();
            }
        }

        if let Ok(raw) = std::env::var("STORE_TIMEOUT_SECS") {
            config.timeout_secs = raw.trim().parse().map_err(|_| {
                StoreError::Config(format!("STORE_TIMEOUT_SECS must be a valid u64, got '{raw}'"))
            })?;
        }

        if config.secret.is_none() {
            tracing::warn!("FIREBASE_SECRET is not set; requests will be unauthenticated");
        }

        Ok(config)
    }
}

// Keeps the secret out of logs.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("root", &self.root)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

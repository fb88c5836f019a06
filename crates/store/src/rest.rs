//! REST client for a Firebase-style realtime database.
//!
//! Every path is addressed as `{base}/{path}.json?auth={secret}`. Writes are
//! single `PUT`s of the whole document, so the store either takes the new
//! state or keeps the old one.

use std::time::Duration;

use async_trait::async_trait;
use parkval_core::types::{ValidationDocument, ValidationRecord};
use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::ValidationStore;

/// HTTP client for the remote validation document.
pub struct RestStore {
    client: reqwest::Client,
    config: StoreConfig,
}

impl RestStore {
    /// Create a client with its own connection pool and the configured timeout.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// `{base}/{path}.json`; an empty path addresses the database root.
    fn url(&self, path: &str) -> String {
        if path.is_empty() {
            format!("{}/.json", self.config.base_url)
        } else {
            format!("{}/{}.json", self.config.base_url, path)
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.config.secret {
            Some(secret) => builder.query(&[("auth", secret)]),
            None => builder,
        }
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        // The URL carries the secret; strip it from transport errors.
        let response = builder.send().await.map_err(|e| e.without_url())?;
        ensure_success(response).await
    }
}

#[async_trait]
impl ValidationStore for RestStore {
    async fn fetch_validations(&self) -> Result<Vec<ValidationRecord>, StoreError> {
        let path = format!("{}/validations", self.config.root);
        let response = self.send(self.request(reqwest::Method::GET, &path)).await?;
        let body: Value = response.json().await.map_err(|e| e.without_url())?;
        let records = decode_validations(body)?;
        tracing::debug!(count = records.len(), "Fetched validation records");
        Ok(records)
    }

    async fn replace_all(&self, document: &ValidationDocument) -> Result<(), StoreError> {
        self.send(self.request(reqwest::Method::PUT, &self.config.root).json(document))
            .await?;
        tracing::info!(
            total_records = document.metadata.total_records,
            source = %document.metadata.source,
            "Validation document written"
        );
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.send(self.request(reqwest::Method::GET, "")).await?;
        Ok(())
    }
}

/// Map non-2xx responses onto [`StoreError`].
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(StoreError::PermissionDenied {
            status: status.as_u16(),
        });
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(StoreError::Api {
        status: status.as_u16(),
        body,
    })
}

/// Decode the `validations` node.
///
/// The node is `null` when nothing was ever written, an array when written
/// as a list (holes come back as `null`), or an object keyed by index when
/// the list was sparse. Object values are taken in numeric key order.
pub fn decode_validations(body: Value) -> Result<Vec<ValidationRecord>, StoreError> {
    let items: Vec<Value> = match body {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| index_order(a, b));
            entries.into_iter().map(|(_, v)| v).collect()
        }
        other => {
            return Err(StoreError::Decode(<serde_json::Error as serde::de::Error>::custom(
                format!("expected validations array or object, got {other}"),
            )))
        }
    };

    items
        .into_iter()
        .filter(|item| !item.is_null())
        .map(|item| serde_json::from_value(item).map_err(StoreError::from))
        .collect()
}

/// Numeric keys first in numeric order, then any other keys as strings.
fn index_order(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

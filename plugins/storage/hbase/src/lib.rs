//! Row store backed by the HBase REST gateway.
//!
//! Rows are fetched with `GET /{table}/{row}` and `Accept: application/json`.
//! The gateway answers with a CellSet in which row keys, column names and
//! values are all base64; values are the raw cell bytes and are handed to
//! the decoder untouched.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use reqwest::{StatusCode, Url};

use quake_api::{Column, RowCells, RowStore, StoreError, StoreFactory, StoreFuture};

mod cell_set;

pub use cell_set::parse_cell_set;

// ═══════════════════════════════════════════════════════════════
//  Config
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, serde::Deserialize)]
pub struct HBaseStoreConfig {
    /// Gateway root, e.g. `http://hbase-rest:8080`.
    pub base_url: String,
    #[serde(default = "default_table")]
    pub table: String,
    /// `user:password` for HTTP basic auth.
    #[serde(default)]
    pub auth: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_table() -> String {
    "quake_state_month".into()
}
fn default_timeout_ms() -> u64 {
    5000
}

// ═══════════════════════════════════════════════════════════════
//  HBaseStore
// ═══════════════════════════════════════════════════════════════

pub struct HBaseStore {
    http: reqwest::Client,
    base_url: Url,
    table: String,
    auth: Option<(String, String)>,
}

impl HBaseStore {
    pub fn new(config: &HBaseStoreConfig) -> Result<Self, StoreError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| StoreError::config(format!("base_url '{}': {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::config(format!("base_url '{}' cannot carry a path", config.base_url)));
        }
        if config.table.is_empty() {
            return Err(StoreError::config("table must not be empty"));
        }
        let auth = match config.auth.as_deref() {
            None => None,
            Some(a) => {
                let (user, password) = a
                    .split_once(':')
                    .ok_or_else(|| StoreError::config("auth must be 'user:password'"))?;
                Some((user.to_owned(), password.to_owned()))
            }
        };
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| StoreError::config(format!("HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url,
            table: config.table.clone(),
            auth,
        })
    }

    /// `{base}/{table}/{segment}`, each segment percent-encoded.
    fn url(&self, segment: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(&self.table).push(segment);
        }
        url
    }

    async fn fetch(&self, url: Url) -> Result<(StatusCode, String), StoreError> {
        let mut req = self.http.get(url).header(reqwest::header::ACCEPT, "application/json");
        if let Some((user, password)) = &self.auth {
            req = req.basic_auth(user, Some(password));
        }
        let resp = req
            .send()
            .await
            .map_err(|e| StoreError::io(format!("HBase request: {e}")))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| StoreError::io(format!("HBase read: {e}")))?;
        Ok((status, body))
    }
}

impl RowStore for HBaseStore {
    fn init(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let (status, body) = self.fetch(self.url("schema")).await?;
            match status {
                s if s.is_success() => {
                    tracing::info!(table = %self.table, base_url = %self.base_url, "hbase table reachable");
                    Ok(())
                }
                StatusCode::NOT_FOUND => {
                    Err(StoreError::config(format!("table '{}' not found", self.table)))
                }
                s => Err(StoreError::io(format!("HBase schema {s}: {}", body.trim()))),
            }
        })
    }

    fn get(&self, row_key: &str) -> StoreFuture<'_, Option<RowCells>> {
        let url = self.url(row_key);
        Box::pin(async move {
            let (status, body) = self.fetch(url).await?;
            match status {
                StatusCode::NOT_FOUND => Ok(None),
                s if s.is_success() => parse_cell_set(&body),
                s => Err(StoreError::io(format!("HBase {s}: {}", body.trim()))),
            }
        })
    }

    fn close(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            tracing::info!(table = %self.table, "hbase store closed");
            Ok(())
        })
    }
}

/// Decode a base64 CellSet field.
fn b64(field: &'static str, s: &str) -> Result<Vec<u8>, StoreError> {
    base64::engine::general_purpose::STANDARD
        .decode(s)
        .map_err(|e| StoreError::format_err(format!("base64 {field}: {e}")))
}

fn column_from_b64(s: &str) -> Result<Column, StoreError> {
    let raw = String::from_utf8(b64("column", s)?)?;
    Column::parse(&raw).ok_or_else(|| StoreError::format_err(format!("column '{raw}' is not family:qualifier")))
}

// ═══════════════════════════════════════════════════════════════
//  HBaseStoreFactory
// ═══════════════════════════════════════════════════════════════

pub struct HBaseStoreFactory;

impl StoreFactory for HBaseStoreFactory {
    fn create(&self, config_json: &str) -> Result<Arc<dyn RowStore>, StoreError> {
        let config: HBaseStoreConfig = serde_json::from_str(config_json)
            .map_err(|e| StoreError::config(format!("hbase storage_config: {e}")))?;
        Ok(Arc::new(HBaseStore::new(&config)?))
    }
}

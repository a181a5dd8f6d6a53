use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use quake_api::{Column, RowCells, RowStore, StoreError, StoreFactory, StoreFuture};

// ═══════════════════════════════════════════════════════════════
//  MemoryStoreConfig
// ═══════════════════════════════════════════════════════════════

/// How a seeded value is laid out in the cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellEncoding {
    /// 4-byte big-endian.
    I32,
    /// 8-byte big-endian.
    I64,
    /// 8-byte big-endian IEEE 754.
    F64,
    /// UTF-8 text, stored verbatim.
    #[default]
    Text,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SeedCell {
    /// `family:qualifier`.
    pub column: String,
    #[serde(default)]
    pub encoding: CellEncoding,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SeedRow {
    pub key: String,
    #[serde(default)]
    pub cells: Vec<SeedCell>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct MemoryStoreConfig {
    #[serde(default)]
    pub rows: Vec<SeedRow>,
}

impl SeedCell {
    fn encode(&self) -> Result<(Column, Vec<u8>), StoreError> {
        let column = Column::parse(&self.column)
            .ok_or_else(|| StoreError::config(format!("column '{}' is not family:qualifier", self.column)))?;
        let bad_value = || {
            StoreError::config(format!(
                "column '{}': {} does not fit {:?}",
                self.column, self.value, self.encoding
            ))
        };
        let bytes = match self.encoding {
            CellEncoding::I32 => {
                let v = self.value.as_i64().ok_or_else(bad_value)?;
                i32::try_from(v).map_err(|_| bad_value())?.to_be_bytes().to_vec()
            }
            CellEncoding::I64 => self.value.as_i64().ok_or_else(bad_value)?.to_be_bytes().to_vec(),
            CellEncoding::F64 => self.value.as_f64().ok_or_else(bad_value)?.to_be_bytes().to_vec(),
            CellEncoding::Text => match &self.value {
                serde_json::Value::String(s) => s.clone().into_bytes(),
                other => other.to_string().into_bytes(),
            },
        };
        Ok((column, bytes))
    }
}

// ═══════════════════════════════════════════════════════════════
//  MemoryStore
// ═══════════════════════════════════════════════════════════════

/// In-memory table for demos and tests. Rows are seeded from config or
/// inserted directly; the service itself never writes.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<HashMap<String, RowCells>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &MemoryStoreConfig) -> Result<Self, StoreError> {
        let mut rows = HashMap::with_capacity(config.rows.len());
        for seed in &config.rows {
            let cells = seed
                .cells
                .iter()
                .map(SeedCell::encode)
                .collect::<Result<RowCells, _>>()
                .map_err(|e| e.with_context(format!("row '{}'", seed.key)))?;
            rows.insert(seed.key.clone(), cells);
        }
        Ok(Self { rows: RwLock::new(rows) })
    }

    /// Put a whole row. An empty `cells` still makes the row exist.
    pub async fn insert(&self, row_key: impl Into<String>, cells: RowCells) {
        self.rows.write().await.insert(row_key.into(), cells);
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

impl RowStore for MemoryStore {
    fn init(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let rows = self.len().await;
            tracing::info!(rows, "memory store ready");
            Ok(())
        })
    }

    fn get(&self, row_key: &str) -> StoreFuture<'_, Option<RowCells>> {
        let row_key = row_key.to_owned();
        Box::pin(async move { Ok(self.rows.read().await.get(&row_key).cloned()) })
    }
}

// ═══════════════════════════════════════════════════════════════
//  MemoryStoreFactory
// ═══════════════════════════════════════════════════════════════

pub struct MemoryStoreFactory;

impl StoreFactory for MemoryStoreFactory {
    fn create(&self, config_json: &str) -> Result<Arc<dyn RowStore>, StoreError> {
        let config: MemoryStoreConfig = if config_json == "{}" {
            MemoryStoreConfig::default()
        } else {
            serde_json::from_str(config_json)?
        };
        Ok(Arc::new(MemoryStore::from_config(&config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quake_api::{ErrorKind, LookupQuery, lookup};

    const SEED: &str = r#"{
        "rows": [
            { "key": "CA#2020#03", "cells": [
                { "column": "s:quake_count", "encoding": "i64", "value": 17 },
                { "column": "s:max_mag", "encoding": "f64", "value": 4.4 },
                { "column": "s:label_quake_ge_4", "encoding": "i32", "value": 1 },
                { "column": "s:pred_prob_ge_4", "value": "0.82" }
            ]},
            { "key": "NV#2020#03" }
        ]
    }"#;

    #[tokio::test]
    async fn seeded_rows_decode() {
        let store = MemoryStoreFactory.create(SEED).unwrap();
        store.init().await.unwrap();

        let cells = store.get("CA#2020#03").await.unwrap().unwrap();
        assert_eq!(cells.get("s", "quake_count"), Some(&17i64.to_be_bytes()[..]));
        assert_eq!(cells.get("s", "label_quake_ge_4"), Some(&1i32.to_be_bytes()[..]));
        assert_eq!(cells.get("s", "pred_prob_ge_4"), Some(&b"0.82"[..]));

        let outcome = lookup(store.as_ref(), &LookupQuery::new("ca", 2020, 3)).await.unwrap();
        let record = outcome.record().unwrap();
        assert_eq!(record.quake_count(), 17);
        assert_eq!(record.max_mag(), 4.4);
        assert_eq!(record.label_quake_ge4(), 1);
        assert_eq!(record.pred_prob_ge4(), 0.82);
    }

    #[tokio::test]
    async fn empty_row_exists_missing_row_does_not() {
        let store = MemoryStoreFactory.create(SEED).unwrap();
        assert_eq!(store.get("NV#2020#03").await.unwrap(), Some(RowCells::new()));
        assert_eq!(store.get("AZ#2020#03").await.unwrap(), None);
    }

    #[tokio::test]
    async fn insert_replaces_row() {
        let store = MemoryStore::new();
        let mut cells = RowCells::new();
        cells.insert(Column::new("s", "max_mag"), b"2.0".to_vec());
        store.insert("UT#2010#01", cells.clone()).await;
        store.insert("UT#2010#01", RowCells::new()).await;
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("UT#2010#01").await.unwrap(), Some(RowCells::new()));
    }

    #[tokio::test]
    async fn init_runs_on_a_spawned_task() {
        let store = MemoryStoreFactory.create(SEED).unwrap();
        let handle = tokio::spawn({
            let store = store.clone();
            async move { store.init().await }
        });
        handle.await.unwrap().unwrap();
    }

    #[test]
    fn empty_config_is_empty_store() {
        assert!(MemoryStoreFactory.create("{}").is_ok());
    }

    #[test]
    fn bad_seed_is_a_config_error() {
        let json = r#"{"rows":[{"key":"K","cells":[{"column":"s:x","encoding":"i32","value":9999999999}]}]}"#;
        let err = MemoryStoreFactory.create(json).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.message().starts_with("row 'K': column 's:x'"), "{err}");

        let json = r#"{"rows":[{"key":"K","cells":[{"column":"nofamily","value":1}]}]}"#;
        assert_eq!(MemoryStoreFactory.create(json).err().unwrap().kind(), ErrorKind::Config);
    }

    #[test]
    fn text_encoding_stringifies_numbers() {
        let cell = SeedCell {
            column: "s:quake_count".into(),
            encoding: CellEncoding::Text,
            value: serde_json::json!(3),
        };
        assert_eq!(cell.encode().unwrap().1, b"3");
    }
}

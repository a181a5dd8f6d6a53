use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use quake_api::{RowStore, StoreFactory};
use quake_api_server::RegionFilter;
use storage_hbase::HBaseStoreFactory;
use storage_memory::MemoryStoreFactory;

use crate::error::ServerError;

#[derive(Parser)]
#[command(name = "quake-server", about = "Monthly earthquake statistics lookup service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Look up one region/month and print the result as JSON.
    Lookup(LookupArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    /// Path to the TOML config file.
    #[arg(long, default_value = "config.toml", env = "QUAKE_CONFIG")]
    pub config: String,
}

#[derive(Args, Clone, Debug)]
pub struct LookupArgs {
    /// Path to the TOML config file.
    #[arg(long, default_value = "config.toml", env = "QUAKE_CONFIG")]
    pub config: String,
    /// Region code, e.g. CA. Case-insensitive.
    #[arg(long, alias = "state")]
    pub region: String,
    #[arg(long)]
    pub year: i32,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,
}

// ---- TOML Config ----

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Regions lookups may name. Absent: the lower 48 states. Empty: any.
    #[serde(default)]
    pub allowed_regions: Option<Vec<String>>,
    /// `"memory"` or `"hbase"`.
    pub storage: String,
    #[serde(default)]
    pub storage_config: Option<toml::Value>,
}

fn default_api_port() -> u16 {
    9200
}
fn default_bind() -> String {
    "0.0.0.0".into()
}

impl ServerConfig {
    pub fn load(path: &str) -> Result<Self, ServerError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config { context: "read", detail: format!("'{path}': {e}") })?;
        Self::parse(&content)
            .map_err(|e| ServerError::Config { context: "parse", detail: format!("'{path}': {e}") })
    }

    pub fn parse(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    pub fn region_filter(&self) -> RegionFilter {
        match &self.allowed_regions {
            None => RegionFilter::lower_48(),
            Some(regions) => RegionFilter::new(regions),
        }
    }

    /// Build the configured store. Not yet initialised.
    pub fn open_store(&self) -> Result<Arc<dyn RowStore>, ServerError> {
        let config_json = config_json_or_empty(&self.storage_config)?;
        let store = match self.storage.as_str() {
            "memory" => MemoryStoreFactory.create(&config_json)?,
            "hbase" => HBaseStoreFactory.create(&config_json)?,
            other => return Err(ServerError::UnknownStorage(other.to_owned())),
        };
        Ok(store)
    }
}

/// `storage_config` as a JSON string, `"{}"` when absent.
pub fn config_json_or_empty(value: &Option<toml::Value>) -> Result<String, ServerError> {
    match value {
        Some(v) => serde_json::to_string(v)
            .map_err(|e| ServerError::Config { context: "storage_config", detail: e.to_string() }),
        None => Ok("{}".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quake_api::{LookupOutcome, LookupQuery, lookup};

    #[test]
    fn defaults() {
        let cfg = ServerConfig::parse(r#"storage = "memory""#).unwrap();
        assert_eq!(cfg.api_port, 9200);
        assert_eq!(cfg.bind, "0.0.0.0");
        assert!(cfg.region_filter().allows("CA"));
        assert!(!cfg.region_filter().allows("AK"));
        assert_eq!(config_json_or_empty(&cfg.storage_config).unwrap(), "{}");
    }

    #[test]
    fn empty_region_list_allows_anything() {
        let cfg = ServerConfig::parse("storage = \"memory\"\nallowed_regions = []").unwrap();
        assert!(cfg.region_filter().allows("AK"));
    }

    #[test]
    fn storage_is_required() {
        assert!(ServerConfig::parse("api_port = 1").is_err());
    }

    #[test]
    fn unknown_storage() {
        let cfg = ServerConfig::parse(r#"storage = "cassandra""#).unwrap();
        assert!(matches!(cfg.open_store(), Err(ServerError::UnknownStorage(s)) if s == "cassandra"));
    }

    #[test]
    fn hbase_config_passes_through() {
        let cfg = ServerConfig::parse(
            r#"
            storage = "hbase"
            [storage_config]
            base_url = "http://hbase-rest:8080"
            table = "quakes"
            timeout_ms = 250
            "#,
        )
        .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&config_json_or_empty(&cfg.storage_config).unwrap()).unwrap();
        assert_eq!(json["table"], "quakes");
        assert_eq!(json["timeout_ms"], 250);
        assert!(cfg.open_store().is_ok());
    }

    #[tokio::test]
    async fn memory_config_seeds_rows() {
        let cfg = ServerConfig::parse(
            r#"
            storage = "memory"

            [[storage_config.rows]]
            key = "CA#2020#03"
            cells = [
                { column = "s:quake_count", encoding = "i64", value = 4 },
                { column = "s:max_mag", value = "3.3" },
            ]
            "#,
        )
        .unwrap();
        let store = cfg.open_store().unwrap();
        store.init().await.unwrap();

        let outcome = lookup(store.as_ref(), &LookupQuery::new("CA", 2020, 3)).await.unwrap();
        let record = outcome.record().unwrap();
        assert_eq!(record.quake_count(), 4);
        assert_eq!(record.max_mag(), 3.3);

        let outcome = lookup(store.as_ref(), &LookupQuery::new("CA", 2020, 4)).await.unwrap();
        assert_eq!(outcome, LookupOutcome::NotFound);
    }
}

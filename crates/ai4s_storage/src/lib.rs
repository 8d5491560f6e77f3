use std::str::FromStr;
use std::sync::Arc;

use ai4s_core::{ArticleStore, Error, Result};

pub mod backends;

pub use backends::*;

pub const DEFAULT_TABLE: &str = "articles";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// No audit trail
    #[default]
    None,
    Memory,
    /// PostgREST-style `POST {url}/rest/v1/{table}`
    Rest,
}

impl FromStr for StoreKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(StoreKind::None),
            "memory" => Ok(StoreKind::Memory),
            "rest" => Ok(StoreKind::Rest),
            other => Err(Error::Storage(format!("Unknown store kind: {other}"))),
        }
    }
}

#[derive(Clone, Default)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub url: Option<String>,
    pub key: Option<String>,
    pub table: String,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("kind", &self.kind)
            .field("url", &self.url)
            .field("key", &self.key.as_deref().map(|_| "<redacted>"))
            .field("table", &self.table)
            .finish()
    }
}

impl StoreConfig {
    /// Load datastore settings from `AI4S_STORE`, `AI4S_STORE_URL`,
    /// `AI4S_STORE_KEY` and `AI4S_STORE_TABLE`.
    pub fn from_env() -> Result<Self> {
        let kind = std::env::var("AI4S_STORE").unwrap_or_default().parse()?;
        let url = std::env::var("AI4S_STORE_URL").ok().filter(|u| !u.trim().is_empty());
        let key = std::env::var("AI4S_STORE_KEY").ok().filter(|k| !k.trim().is_empty());
        let table = std::env::var("AI4S_STORE_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string());
        Ok(Self { kind, url, key, table })
    }
}

/// Build the configured store, or `None` when persistence is disabled.
pub fn create_store(config: &StoreConfig) -> Result<Option<Arc<dyn ArticleStore>>> {
    let store: Arc<dyn ArticleStore> = match config.kind {
        StoreKind::None => return Ok(None),
        StoreKind::Memory => Arc::new(MemoryStore::new()),
        StoreKind::Rest => {
            let url = config
                .url
                .as_deref()
                .ok_or_else(|| Error::Storage("AI4S_STORE_URL is required for the rest store".to_string()))?;
            let key = config
                .key
                .clone()
                .ok_or_else(|| Error::Storage("AI4S_STORE_KEY is required for the rest store".to_string()))?;
            Arc::new(RestStore::new(url, &config.table, key)?)
        }
    };
    tracing::info!(store = store.name(), "article store initialized");
    Ok(Some(store))
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_store, StoreConfig, StoreKind};
}

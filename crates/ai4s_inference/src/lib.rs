use std::str::FromStr;
use std::time::Duration;

use ai4s_core::{Error, Result};

pub mod format;
pub mod generator;
pub mod models;
pub mod prompts;
pub mod suggestions;

pub use format::OutputFormat;
pub use generator::{ArticleGenerator, GenerationSettings};
pub use models::create_oracle;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleProvider {
    /// Any OpenAI-compatible chat completions endpoint
    OpenAi,
    /// Offline echo oracle
    Dummy,
}

impl FromStr for OracleProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(OracleProvider::OpenAi),
            "dummy" => Ok(OracleProvider::Dummy),
            other => Err(Error::Validation(format!("Unknown oracle provider: {other}"))),
        }
    }
}

#[derive(Clone)]
pub struct OracleConfig {
    pub provider: OracleProvider,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub suggestion_model: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("suggestion_model", &self.suggestion_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: OracleProvider::OpenAi,
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            suggestion_model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_ORACLE_TIMEOUT,
        }
    }
}

impl OracleConfig {
    /// Load oracle settings from the environment.
    ///
    /// - `ORACLE_PROVIDER`: `openai` (default) or `dummy`
    /// - `ORACLE_API_KEY` (or `OPENAI_API_KEY`): provider credential
    /// - `ORACLE_BASE_URL`: chat completions base URL
    /// - `ORACLE_MODEL`: model for the article
    /// - `ORACLE_SUGGESTION_MODEL`: model for suggested topics (defaults to `ORACLE_MODEL`)
    /// - `ORACLE_TIMEOUT_SECS`: per-call timeout
    pub fn from_env() -> Result<Self> {
        let provider = match std::env::var("ORACLE_PROVIDER") {
            Ok(value) => value.parse()?,
            Err(_) => OracleProvider::OpenAi,
        };

        let api_key = std::env::var("ORACLE_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());

        let base_url = std::env::var("ORACLE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let model = std::env::var("ORACLE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let suggestion_model = std::env::var("ORACLE_SUGGESTION_MODEL").unwrap_or_else(|_| model.clone());

        let timeout = match std::env::var("ORACLE_TIMEOUT_SECS") {
            Ok(value) => Duration::from_secs(value.trim().parse().map_err(|_| {
                Error::Validation(format!("ORACLE_TIMEOUT_SECS must be a number of seconds, got {value:?}"))
            })?),
            Err(_) => DEFAULT_ORACLE_TIMEOUT,
        };

        Ok(Self {
            provider,
            api_key,
            base_url,
            model,
            suggestion_model,
            timeout,
        })
    }
}

pub mod prelude {
    pub use super::{ArticleGenerator, GenerationSettings, OracleConfig, OracleProvider, OutputFormat};
    pub use super::models::create_oracle;
    pub use ai4s_core::{ArticleRequest, ArticleResponse, Error, Result, TextOracle};
}

//! Service configuration loaded from environment variables.

use ai4s_core::{Error, Result};
use ai4s_inference::prompts::DEFAULT_PREVIOUS_BLOG_LIMIT;
use ai4s_inference::{GenerationSettings, OracleConfig, OutputFormat};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8787";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Server bind address (e.g., "0.0.0.0:8787").
    pub bind_addr: String,

    /// Value of `Access-Control-Allow-Origin`; `*` allows any origin.
    pub cors_origin: String,

    /// Whether the oracle writes HTML directly or Markdown that gets converted.
    pub output_format: OutputFormat,

    /// Maximum number of characters of `previousBlog` embedded in the prompt.
    pub previous_blog_limit: usize,

    pub oracle: OracleConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            cors_origin: "*".to_string(),
            output_format: OutputFormat::default(),
            previous_blog_limit: DEFAULT_PREVIOUS_BLOG_LIMIT,
            oracle: OracleConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `AI4S_BIND_ADDR`: Server bind address (default: "0.0.0.0:8787")
    /// - `AI4S_CORS_ORIGIN`: Allowed origin (default: "*")
    /// - `AI4S_OUTPUT_FORMAT`: `html` or `markdown` (default: "html")
    /// - `AI4S_PREVIOUS_BLOG_LIMIT`: Style reference cap in characters (default: 1000)
    ///
    /// Oracle settings are read by [`OracleConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("AI4S_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let cors_origin = std::env::var("AI4S_CORS_ORIGIN")
            .ok()
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| "*".to_string());

        let output_format = match std::env::var("AI4S_OUTPUT_FORMAT") {
            Ok(value) => value.parse()?,
            Err(_) => OutputFormat::default(),
        };

        let previous_blog_limit = match std::env::var("AI4S_PREVIOUS_BLOG_LIMIT") {
            Ok(value) => value.trim().parse().map_err(|_| {
                Error::Validation(format!("AI4S_PREVIOUS_BLOG_LIMIT must be a character count, got {value:?}"))
            })?,
            Err(_) => DEFAULT_PREVIOUS_BLOG_LIMIT,
        };

        let oracle = OracleConfig::from_env()?;

        tracing::info!(
            bind_addr = %bind_addr,
            cors_origin = %cors_origin,
            output_format = %output_format,
            previous_blog_limit,
            oracle = ?oracle.provider,
            model = %oracle.model,
            "service configuration loaded"
        );

        Ok(Self {
            bind_addr,
            cors_origin,
            output_format,
            previous_blog_limit,
            oracle,
        })
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings::from_oracle_config(&self.oracle, self.output_format, self.previous_blog_limit)
    }
}

use std::sync::Arc;

use ai4s_core::{Result, TextOracle};
use ai4s_inference::{create_oracle, ArticleGenerator};

use crate::config::ServiceConfig;

/// Immutable state shared by every request handler.
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub generator: ArticleGenerator,
}

impl AppState {
    /// Build the state with the oracle selected in `config`.
    pub fn from_config(config: ServiceConfig) -> Result<Self> {
        let oracle = create_oracle(&config.oracle)?;
        Ok(Self::with_oracle(config, oracle))
    }

    /// Build the state around an already constructed oracle.
    pub fn with_oracle(config: ServiceConfig, oracle: Arc<dyn TextOracle>) -> Self {
        let generator = ArticleGenerator::new(oracle, config.generation_settings());
        Self {
            config: Arc::new(config),
            generator,
        }
    }
}

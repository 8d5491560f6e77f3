use std::sync::Arc;

use ai4s_core::{Result, TextOracle};

use crate::{OracleConfig, OracleProvider};

pub mod dummy;
pub mod openai;

pub use dummy::DummyOracle;
pub use openai::OpenAiOracle;

/// Build the oracle selected by `config.provider`.
pub fn create_oracle(config: &OracleConfig) -> Result<Arc<dyn TextOracle>> {
    let oracle: Arc<dyn TextOracle> = match config.provider {
        OracleProvider::OpenAi => Arc::new(OpenAiOracle::new(config.api_key.clone(), &config.base_url)?),
        OracleProvider::Dummy => Arc::new(DummyOracle::new()),
    };
    tracing::info!(oracle = oracle.name(), model = %config.model, "text oracle initialized");
    Ok(oracle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dummy() {
        let config = OracleConfig {
            provider: OracleProvider::Dummy,
            ..OracleConfig::default()
        };
        let oracle = create_oracle(&config).unwrap();
        assert_eq!(oracle.name(), "Dummy");
    }

    #[test]
    fn test_openai_requires_key() {
        let config = OracleConfig::default();
        assert!(create_oracle(&config).is_err());

        let config = OracleConfig {
            api_key: Some("sk-test".to_string()),
            ..OracleConfig::default()
        };
        assert_eq!(create_oracle(&config).unwrap().name(), "OpenAI");
    }
}

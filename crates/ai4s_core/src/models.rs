use async_trait::async_trait;
use crate::Result;

/// A text-generation provider treated as a black box.
#[async_trait]
pub trait TextOracle: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &str;

    /// Produce a single completion for a system/user prompt pair
    async fn generate_text(&self, system_prompt: &str, user_prompt: &str, model_id: &str) -> Result<String>;
}

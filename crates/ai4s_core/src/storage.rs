use async_trait::async_trait;
use crate::types::PersistedArticleRecord;
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Name of the backend, for logs
    fn name(&self) -> &str;

    /// Append a generated article to the audit trail
    async fn append(&self, record: &PersistedArticleRecord) -> Result<()>;
}

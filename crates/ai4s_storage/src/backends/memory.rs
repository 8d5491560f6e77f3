use async_trait::async_trait;
use ai4s_core::{ArticleStore, PersistedArticleRecord, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keeps appended records in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<PersistedArticleRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Snapshot of everything appended so far, oldest first.
    pub async fn records(&self) -> Vec<PersistedArticleRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn append(&self, record: &PersistedArticleRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.push(record.clone());
        tracing::debug!(id = %record.id, total = records.len(), "record appended to memory store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai4s_core::ArticleRequest;

    #[tokio::test]
    async fn test_memory_store_appends_in_order() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        let first = ArticleRequest::new("First", "Ferris", None::<&str>).unwrap();
        let second = ArticleRequest::new("Second", "Ferris", None::<&str>).unwrap();
        store.append(&PersistedArticleRecord::new(&first, "<p>1</p>")).await.unwrap();
        store.append(&PersistedArticleRecord::new(&second, "<p>2</p>")).await.unwrap();

        let records = store.records().await;
        assert_eq!(store.len().await, 2);
        assert_eq!(records[0].topic, "First");
        assert_eq!(records[1].content, "<p>2</p>");
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let store = MemoryStore::new();
        let handle = store.clone();
        let request = ArticleRequest::new("Shared", "Ferris", None::<&str>).unwrap();
        handle.append(&PersistedArticleRecord::new(&request, "<p>x</p>")).await.unwrap();
        assert_eq!(store.len().await, 1);
    }
}

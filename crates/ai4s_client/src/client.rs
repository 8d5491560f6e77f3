use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ai4s_core::{
    ArticleRequest, ArticleResponse, ArticleStore, Error, GeneratedArticle, PersistedArticleRecord, Result,
    MAX_SUGGESTED_TOPICS,
};
use reqwest::{Client, StatusCode};

use crate::ClientConfig;

/// Submits article requests to the generation service.
///
/// One submission at a time: a second `submit` while the first is in flight
/// fails with [`Error::Busy`]. Successful generations are appended to the
/// optional store; a failed append is logged and otherwise ignored.
pub struct ArticleClient {
    http: Client,
    config: ClientConfig,
    store: Option<Arc<dyn ArticleStore>>,
    busy: AtomicBool,
}

impl fmt::Debug for ArticleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticleClient")
            .field("config", &self.config)
            .field("store", &self.store.as_ref().map(|s| s.name()))
            .field("busy", &self.is_busy())
            .finish()
    }
}

impl ArticleClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            config,
            store: None,
            busy: AtomicBool::new(false),
        })
    }

    pub fn with_store(mut self, store: Arc<dyn ArticleStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Validate the inputs, send one request and return the generated article.
    ///
    /// Blank `topic` or `creator_name` fail with [`Error::Validation`] before
    /// anything is sent. Nothing is retried.
    pub async fn submit(
        &self,
        topic: &str,
        creator_name: &str,
        previous_blog: Option<&str>,
    ) -> Result<GeneratedArticle> {
        let request = ArticleRequest::new(topic, creator_name, previous_blog)?;
        let _busy = BusyGuard::acquire(&self.busy)?;

        let response = self.send(&request).await?;
        self.persist(&request, &response).await;

        Ok(GeneratedArticle { request, response })
    }

    async fn send(&self, request: &ArticleRequest) -> Result<ArticleResponse> {
        tracing::info!(endpoint = %self.config.endpoint, topic = request.topic(), "submitting article request");

        let response = self.http
            .post(self.config.endpoint.clone())
            .bearer_auth(&self.config.bearer_token)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Service {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let mut article: ArticleResponse = serde_json::from_slice(&body).map_err(|e| Error::Service {
            status: status.as_u16(),
            message: format!("unexpected response body: {e}"),
        })?;
        article.suggested_topics.truncate(MAX_SUGGESTED_TOPICS);

        tracing::info!(
            content_len = article.content.len(),
            suggestions = article.suggested_topics.len(),
            "article received"
        );
        Ok(article)
    }

    async fn persist(&self, request: &ArticleRequest, response: &ArticleResponse) {
        let Some(store) = &self.store else {
            return;
        };
        let record = PersistedArticleRecord::new(request, &response.content);
        if let Err(e) = store.append(&record).await {
            tracing::warn!(store = store.name(), error = %e, "failed to save article");
        }
    }
}

/// Message for a non-2xx reply: the service's `{"error": ...}` when present.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string())
}

struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| Error::Busy)?;
        Ok(Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

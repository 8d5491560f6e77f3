use std::fmt;

use async_trait::async_trait;
use ai4s_core::{ArticleStore, Error, PersistedArticleRecord, Result};
use reqwest::Client;
use url::Url;

/// Inserts records through a PostgREST-compatible endpoint
/// (`POST {base}/rest/v1/{table}`), authenticated with an API key.
pub struct RestStore {
    client: Client,
    endpoint: Url,
    key: String,
}

impl RestStore {
    pub fn new(base_url: &str, table: &str, key: String) -> Result<Self> {
        let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| Error::Storage(format!("invalid store URL {base_url:?}: {e}")))?;
        let endpoint = base
            .join(&format!("rest/v1/{table}"))
            .map_err(|e| Error::Storage(format!("invalid store table {table:?}: {e}")))?;
        Ok(Self {
            client: Client::new(),
            endpoint,
            key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl fmt::Debug for RestStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestStore")
            .field("endpoint", &self.endpoint.as_str())
            .field("key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl ArticleStore for RestStore {
    fn name(&self) -> &str {
        "rest"
    }

    async fn append(&self, record: &PersistedArticleRecord) -> Result<()> {
        let response = self.client
            .post(self.endpoint.clone())
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Storage(format!("insert into {} returned {status}", self.endpoint)));
        }
        tracing::debug!(id = %record.id, endpoint = %self.endpoint, "record inserted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai4s_core::ArticleRequest;
    use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>;

    async fn insert(State(captured): State<Captured>, headers: HeaderMap, Json(body): Json<serde_json::Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        captured.lock().unwrap().push((auth, body));
    }

    async fn spawn_server(captured: Captured) -> String {
        let app = Router::new()
            .route("/rest/v1/articles", post(insert))
            .with_state(captured);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_endpoint() {
        let store = RestStore::new("https://db.example.com/", "articles", "anon".to_string()).unwrap();
        assert_eq!(store.endpoint().as_str(), "https://db.example.com/rest/v1/articles");
        assert!(RestStore::new("not a url", "articles", "anon".to_string()).is_err());
    }

    #[tokio::test]
    async fn test_append_posts_record() {
        let captured: Captured = Arc::default();
        let base = spawn_server(captured.clone()).await;
        let store = RestStore::new(&base, "articles", "anon-key".to_string()).unwrap();

        let request = ArticleRequest::new("Edge Computing", "Jane Doe", Some("old post")).unwrap();
        store.append(&PersistedArticleRecord::new(&request, "<p>body</p>")).await.unwrap();

        let captured = captured.lock().unwrap();
        assert_eq!(captured.len(), 1);
        let (auth, body) = &captured[0];
        assert_eq!(auth.as_deref(), Some("Bearer anon-key"));
        assert_eq!(body["topic"], "Edge Computing");
        assert_eq!(body["creator_name"], "Jane Doe");
        assert_eq!(body["previous_blog"], "old post");
        assert_eq!(body["content"], "<p>body</p>");
    }

    #[tokio::test]
    async fn test_append_reports_rejection() {
        let captured: Captured = Arc::default();
        let base = spawn_server(captured).await;
        let store = RestStore::new(&base, "missing_table", "anon-key".to_string()).unwrap();

        let request = ArticleRequest::new("Edge Computing", "Jane Doe", None::<&str>).unwrap();
        let err = store.append(&PersistedArticleRecord::new(&request, "<p>x</p>")).await.unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }
}

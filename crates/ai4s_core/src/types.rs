use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Upper bound on the number of follow-up titles returned with an article.
pub const MAX_SUGGESTED_TOPICS: usize = 5;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Topic and creator name are required";

/// Input for one article generation. Only built through [`ArticleRequest::new`],
/// so `topic` and `creator_name` are never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRequest {
    topic: String,
    creator_name: String,
    previous_blog: Option<String>,
}

impl ArticleRequest {
    pub fn new(
        topic: impl AsRef<str>,
        creator_name: impl AsRef<str>,
        previous_blog: Option<impl AsRef<str>>,
    ) -> Result<Self> {
        let topic = topic.as_ref().trim();
        let creator_name = creator_name.as_ref().trim();
        if topic.is_empty() || creator_name.is_empty() {
            return Err(Error::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        }

        let previous_blog = previous_blog
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Self {
            topic: topic.to_string(),
            creator_name: creator_name.to_string(),
            previous_blog,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn creator_name(&self) -> &str {
        &self.creator_name
    }

    pub fn previous_blog(&self) -> Option<&str> {
        self.previous_blog.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    /// HTML fragment
    pub content: String,
    #[serde(default)]
    pub suggested_topics: Vec<String>,
}

/// Row appended to the datastore after a successful generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedArticleRecord {
    pub id: Uuid,
    pub topic: String,
    pub creator_name: String,
    pub content: String,
    pub previous_blog: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PersistedArticleRecord {
    pub fn new(request: &ArticleRequest, content: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic: request.topic().to_string(),
            creator_name: request.creator_name().to_string(),
            content: content.to_string(),
            previous_blog: request.previous_blog().map(str::to_string),
            created_at: Utc::now(),
        }
    }
}

/// The last successful generation together with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArticle {
    pub request: ArticleRequest,
    pub response: ArticleResponse,
}

impl GeneratedArticle {
    pub fn topic(&self) -> &str {
        self.request.topic()
    }

    pub fn content(&self) -> &str {
        &self.response.content
    }

    pub fn suggested_topics(&self) -> &[String] {
        &self.response.suggested_topics
    }

    /// Raw HTML placed on the clipboard by the copy action.
    pub fn clipboard_text(&self) -> &str {
        &self.response.content
    }
}

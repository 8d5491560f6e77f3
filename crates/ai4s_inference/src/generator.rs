use std::sync::Arc;
use std::time::{Duration, Instant};

use ai4s_core::{ArticleRequest, ArticleResponse, Error, Result, TextOracle};
use chrono::{Local, NaiveDate};

use crate::format::OutputFormat;
use crate::prompts::{article_prompt, suggestion_prompt, Prompt, DEFAULT_PREVIOUS_BLOG_LIMIT};
use crate::suggestions::parse_suggestions;
use crate::{OracleConfig, DEFAULT_MODEL, DEFAULT_ORACLE_TIMEOUT};

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub output_format: OutputFormat,
    pub article_model: String,
    pub suggestion_model: String,
    pub previous_blog_limit: usize,
    pub oracle_timeout: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            article_model: DEFAULT_MODEL.to_string(),
            suggestion_model: DEFAULT_MODEL.to_string(),
            previous_blog_limit: DEFAULT_PREVIOUS_BLOG_LIMIT,
            oracle_timeout: DEFAULT_ORACLE_TIMEOUT,
        }
    }
}

impl GenerationSettings {
    pub fn from_oracle_config(config: &OracleConfig, output_format: OutputFormat, previous_blog_limit: usize) -> Self {
        Self {
            output_format,
            article_model: config.model.clone(),
            suggestion_model: config.suggestion_model.clone(),
            previous_blog_limit,
            oracle_timeout: config.timeout,
        }
    }
}

/// Turns an [`ArticleRequest`] into an [`ArticleResponse`].
///
/// Every request costs exactly two oracle calls, article and suggestions,
/// issued concurrently. Neither is retried.
pub struct ArticleGenerator {
    oracle: Arc<dyn TextOracle>,
    settings: GenerationSettings,
}

impl ArticleGenerator {
    pub fn new(oracle: Arc<dyn TextOracle>, settings: GenerationSettings) -> Self {
        Self { oracle, settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub async fn generate(&self, request: &ArticleRequest) -> Result<ArticleResponse> {
        self.generate_on(request, Local::now().date_naive()).await
    }

    /// Same as [`generate`](Self::generate) with an explicit publication date.
    pub async fn generate_on(&self, request: &ArticleRequest, date: NaiveDate) -> Result<ArticleResponse> {
        let settings = &self.settings;
        let article = article_prompt(request, date, settings.output_format, settings.previous_blog_limit);
        let suggestions = suggestion_prompt(request.topic());

        let (raw_article, raw_suggestions) = tokio::try_join!(
            self.call(&article, &settings.article_model),
            self.call(&suggestions, &settings.suggestion_model),
        )?;

        let content = settings.output_format.normalize(&raw_article);
        if content.trim().is_empty() {
            return Err(Error::Oracle("article completion was empty".to_string()));
        }
        let suggested_topics = parse_suggestions(&raw_suggestions);

        tracing::info!(
            topic = request.topic(),
            format = %settings.output_format,
            content_len = content.len(),
            suggestions = suggested_topics.len(),
            "article generated"
        );

        Ok(ArticleResponse { content, suggested_topics })
    }

    async fn call(&self, prompt: &Prompt, model: &str) -> Result<String> {
        let started = Instant::now();
        let timeout = self.settings.oracle_timeout;

        let reply = tokio::time::timeout(timeout, self.oracle.generate_text(&prompt.system, &prompt.user, model))
            .await
            .map_err(|_| Error::Oracle(format!("{} did not answer within {}s", self.oracle.name(), timeout.as_secs_f32())))??;

        tracing::debug!(
            oracle = self.oracle.name(),
            model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            reply_len = reply.len(),
            "oracle call finished"
        );
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DummyOracle;
    use crate::prompts::SUGGESTION_SYSTEM_PROMPT;

    fn request() -> ArticleRequest {
        ArticleRequest::new("Edge Computing", "Jane Doe", None::<&str>).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[tokio::test]
    async fn test_generate_with_echo_oracle() {
        let oracle = Arc::new(DummyOracle::new());
        let generator = ArticleGenerator::new(oracle.clone(), GenerationSettings::default());

        let response = generator.generate_on(&request(), date()).await.unwrap();
        assert!(response.content.contains("Edge Computing"));
        assert!(response.content.contains("Jane Doe"));
        assert_eq!(response.suggested_topics.len(), 5);
        assert_eq!(oracle.calls(), 2);
    }

    #[tokio::test]
    async fn test_markdown_output_is_converted() {
        let oracle = Arc::new(
            DummyOracle::new()
                .with_reply(SUGGESTION_SYSTEM_PROMPT, "1. One\n2. Two")
                .with_reply("Write a comprehensive", "# Edge Computing\n\nBy **Jane Doe**"),
        );
        let settings = GenerationSettings {
            output_format: OutputFormat::Markdown,
            ..GenerationSettings::default()
        };
        let generator = ArticleGenerator::new(oracle, settings);

        let response = generator.generate_on(&request(), date()).await.unwrap();
        assert_eq!(response.content, "<h1>Edge Computing</h1>\n<p>By <strong>Jane Doe</strong></p>\n");
        assert_eq!(response.suggested_topics, vec!["One", "Two"]);
    }

    #[tokio::test]
    async fn test_html_output_is_relayed() {
        let html = "<div class=\"article-content\"><h1 class=\"text-4xl\">Edge Computing</h1></div>";
        let oracle = Arc::new(
            DummyOracle::new()
                .with_reply(SUGGESTION_SYSTEM_PROMPT, "")
                .with_reply("Write a comprehensive", html),
        );
        let generator = ArticleGenerator::new(oracle, GenerationSettings::default());

        let response = generator.generate_on(&request(), date()).await.unwrap();
        assert_eq!(response.content, html);
        assert!(response.suggested_topics.is_empty());
    }

    #[tokio::test]
    async fn test_oracle_failure_fails_request() {
        let oracle = Arc::new(DummyOracle::new().failing("upstream down"));
        let generator = ArticleGenerator::new(oracle, GenerationSettings::default());

        let err = generator.generate_on(&request(), date()).await.unwrap_err();
        assert!(matches!(err, Error::Oracle(_)));
    }

    #[tokio::test]
    async fn test_empty_article_is_an_error() {
        let oracle = Arc::new(DummyOracle::new().with_reply("Write a comprehensive", "   "));
        let generator = ArticleGenerator::new(oracle, GenerationSettings::default());

        let err = generator.generate_on(&request(), date()).await.unwrap_err();
        assert!(matches!(err, Error::Oracle(_)));
    }

    #[tokio::test]
    async fn test_oracle_timeout() {
        let oracle = Arc::new(DummyOracle::new().with_delay(Duration::from_secs(30)));
        let settings = GenerationSettings {
            oracle_timeout: Duration::from_millis(50),
            ..GenerationSettings::default()
        };
        let generator = ArticleGenerator::new(oracle, settings);

        let err = generator.generate_on(&request(), date()).await.unwrap_err();
        assert!(err.to_string().contains("did not answer"));
    }
}

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ai4s_core::{Error, Result, TextOracle, MAX_SUGGESTED_TOPICS};

use crate::prompts::SUGGESTION_SYSTEM_PROMPT;

/// Offline oracle.
///
/// Without canned replies it echoes the user prompt back as HTML paragraphs
/// and answers suggestion prompts with a numbered list built from the quoted
/// topic. Canned replies, failures and delays can be configured for tests.
#[derive(Default)]
pub struct DummyOracle {
    replies: Vec<(String, String)>,
    failure: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl fmt::Debug for DummyOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyOracle")
            .field("replies", &self.replies.len())
            .field("calls", &self.calls())
            .finish()
    }
}

impl DummyOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer with `reply` whenever either prompt contains `needle`.
    pub fn with_reply(mut self, needle: impl Into<String>, reply: impl Into<String>) -> Self {
        self.replies.push((needle.into(), reply.into()));
        self
    }

    /// Fail every call with an oracle error.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `generate_text` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextOracle for DummyOracle {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate_text(&self, system_prompt: &str, user_prompt: &str, _model_id: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(Error::Oracle(message.clone()));
        }

        if let Some((_, reply)) = self
            .replies
            .iter()
            .find(|(needle, _)| system_prompt.contains(needle.as_str()) || user_prompt.contains(needle.as_str()))
        {
            return Ok(reply.clone());
        }

        if system_prompt == SUGGESTION_SYSTEM_PROMPT {
            let topic = user_prompt.split('"').nth(1).unwrap_or("this topic");
            let titles = [
                format!("Advanced Techniques in {topic}"),
                format!("{topic}: A Beginner's Complete Guide"),
                format!("The Future of {topic}"),
                format!("Common Mistakes to Avoid in {topic}"),
                format!("{topic} vs Traditional Approaches: A Comparison"),
            ];
            return Ok(titles
                .iter()
                .take(MAX_SUGGESTED_TOPICS)
                .enumerate()
                .map(|(i, title)| format!("{}. {title}", i + 1))
                .collect::<Vec<_>>()
                .join("\n"));
        }

        Ok(user_prompt
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| format!("<p>{}</p>", escape_html(line)))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::suggestion_prompt;
    use crate::suggestions::parse_suggestions;

    #[tokio::test]
    async fn test_echoes_user_prompt() {
        let oracle = DummyOracle::new();
        let reply = oracle.generate_text("system", "Write about <Rust>\n\nBy Ferris", "m").await.unwrap();
        assert_eq!(reply, "<p>Write about &lt;Rust&gt;</p>\n<p>By Ferris</p>");
        assert_eq!(oracle.calls(), 1);
    }

    #[tokio::test]
    async fn test_suggestions_from_topic() {
        let oracle = DummyOracle::new();
        let prompt = suggestion_prompt("Edge Computing");
        let reply = oracle.generate_text(&prompt.system, &prompt.user, "m").await.unwrap();
        let parsed = parse_suggestions(&reply);
        assert_eq!(parsed.len(), 5);
        assert_eq!(parsed[0], "Advanced Techniques in Edge Computing");
    }

    #[tokio::test]
    async fn test_canned_reply_and_failure() {
        let oracle = DummyOracle::new().with_reply("Rust", "# Rust");
        assert_eq!(oracle.generate_text("s", "all about Rust", "m").await.unwrap(), "# Rust");

        let oracle = DummyOracle::new().failing("quota exceeded");
        let err = oracle.generate_text("s", "u", "m").await.unwrap_err();
        assert_eq!(err.to_string(), "Oracle error: quota exceeded");
        assert_eq!(oracle.calls(), 1);
    }
}

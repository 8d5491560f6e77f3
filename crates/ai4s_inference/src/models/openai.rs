use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use ai4s_core::{Error, Result, TextOracle};

const TEMPERATURE: f32 = 0.7;

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

/// Oracle backed by an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiOracle {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiOracle {
    pub fn new(api_key: Option<String>, base_url: &str) -> Result<Self> {
        let api_key = api_key.ok_or_else(|| Error::Oracle("Oracle API key is required".to_string()))?;
        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl fmt::Debug for OpenAiOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiOracle")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TextOracle for OpenAiOracle {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn generate_text(&self, system_prompt: &str, user_prompt: &str, model_id: &str) -> Result<String> {
        let request = ChatRequest {
            model: model_id,
            messages: vec![
                ChatMessage { role: "system", content: system_prompt },
                ChatMessage { role: "user", content: user_prompt },
            ],
            temperature: TEMPERATURE,
        };

        let response = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Oracle(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Oracle(format!(
                "{model_id} returned {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let completion = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| Error::Oracle(format!("malformed completion: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| Error::Oracle(format!("{model_id} returned an empty completion")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_requires_api_key() {
        let result = OpenAiOracle::new(None, "https://api.openai.com/v1");
        assert_eq!(result.unwrap_err().to_string(), "Oracle error: Oracle API key is required");

        let oracle = OpenAiOracle::new(Some("sk-test".to_string()), "http://localhost:8080/v1/").unwrap();
        assert_eq!(oracle.base_url, "http://localhost:8080/v1");
        assert!(!format!("{oracle:?}").contains("sk-test"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_oracle_error() {
        let oracle = OpenAiOracle::new(Some("sk-test".to_string()), "http://127.0.0.1:9").unwrap();
        let err = oracle.generate_text("system", "user", "gpt-4o-mini").await.unwrap_err();
        assert!(matches!(err, Error::Oracle(_)));
    }
}

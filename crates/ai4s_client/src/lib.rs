//! Client side of the article generator: builds and submits requests, keeps
//! the busy flag, records successful generations and exports the result.

use std::time::Duration;

use ai4s_core::{Error, Result};
use url::Url;

pub mod client;
pub mod copy;
pub mod export;

pub use client::ArticleClient;
pub use copy::{CopyAcknowledgement, COPY_ACK_WINDOW};
pub use export::ArticleExports;

pub const DEFAULT_ENDPOINT_PATH: &str = "/api/article";
pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Clone)]
pub struct ClientConfig {
    /// Full URL of the generation endpoint.
    pub endpoint: Url,
    pub bearer_token: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("bearer_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(service_url: &str, endpoint_path: &str, bearer_token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            endpoint: endpoint_url(service_url, endpoint_path)?,
            bearer_token: bearer_token.into(),
            timeout: DEFAULT_CLIENT_TIMEOUT,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `AI4S_SERVICE_URL`: Base URL of the generation service
    /// - `AI4S_BEARER_TOKEN`: Token sent as `Authorization: Bearer`
    ///
    /// Optional:
    /// - `AI4S_ENDPOINT_PATH`: Path appended to the base URL (default: "/api/article")
    /// - `AI4S_CLIENT_TIMEOUT_SECS`: Request timeout in seconds (default: 120)
    pub fn from_env() -> Result<Self> {
        let service_url = required_var("AI4S_SERVICE_URL")?;
        let bearer_token = required_var("AI4S_BEARER_TOKEN")?;
        let endpoint_path =
            std::env::var("AI4S_ENDPOINT_PATH").unwrap_or_else(|_| DEFAULT_ENDPOINT_PATH.to_string());

        let timeout = match std::env::var("AI4S_CLIENT_TIMEOUT_SECS") {
            Ok(value) => Duration::from_secs(value.trim().parse().map_err(|_| {
                Error::Validation(format!("AI4S_CLIENT_TIMEOUT_SECS must be a number of seconds, got {value:?}"))
            })?),
            Err(_) => DEFAULT_CLIENT_TIMEOUT,
        };

        let config = Self {
            endpoint: endpoint_url(&service_url, &endpoint_path)?,
            bearer_token,
            timeout,
        };
        tracing::debug!(endpoint = %config.endpoint, timeout_secs = timeout.as_secs(), "client configuration loaded");
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn required_var(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Validation(format!("{key} environment variable is required")))
}

fn endpoint_url(service_url: &str, endpoint_path: &str) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        service_url.trim().trim_end_matches('/'),
        endpoint_path.trim().trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| Error::Validation(format!("invalid service URL {joined:?}: {e}")))
}

pub mod prelude {
    pub use ai4s_core::{ArticleRequest, ArticleResponse, Error, GeneratedArticle, Result};
    pub use crate::{ArticleClient, ArticleExports, ClientConfig, CopyAcknowledgement};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "AI4S_SERVICE_URL",
        "AI4S_BEARER_TOKEN",
        "AI4S_ENDPOINT_PATH",
        "AI4S_CLIENT_TIMEOUT_SECS",
    ];

    fn with_env_vars<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_MUTEX.lock().unwrap();

        let saved: Vec<_> = ENV_KEYS.iter().map(|k| (*k, std::env::var(k).ok())).collect();
        for k in ENV_KEYS {
            std::env::remove_var(k);
        }
        for (k, v) in vars {
            std::env::set_var(k, v);
        }

        f();

        for (k, v) in &saved {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }
    }

    #[test]
    fn test_config_requires_url_and_token() {
        with_env_vars(&[], || {
            let err = ClientConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("AI4S_SERVICE_URL"));
        });
        with_env_vars(&[("AI4S_SERVICE_URL", "https://x.example.com")], || {
            let err = ClientConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("AI4S_BEARER_TOKEN"));
        });
    }

    #[test]
    fn test_config_defaults() {
        with_env_vars(
            &[("AI4S_SERVICE_URL", "https://x.example.com/"), ("AI4S_BEARER_TOKEN", "anon")],
            || {
                let config = ClientConfig::from_env().unwrap();
                assert_eq!(config.endpoint.as_str(), "https://x.example.com/api/article");
                assert_eq!(config.bearer_token, "anon");
                assert_eq!(config.timeout, DEFAULT_CLIENT_TIMEOUT);
            },
        );
    }

    #[test]
    fn test_config_custom_path_and_timeout() {
        with_env_vars(
            &[
                ("AI4S_SERVICE_URL", "https://x.example.com/functions/v1"),
                ("AI4S_BEARER_TOKEN", "anon"),
                ("AI4S_ENDPOINT_PATH", "generate-article"),
                ("AI4S_CLIENT_TIMEOUT_SECS", "15"),
            ],
            || {
                let config = ClientConfig::from_env().unwrap();
                assert_eq!(config.endpoint.as_str(), "https://x.example.com/functions/v1/generate-article");
                assert_eq!(config.timeout, Duration::from_secs(15));
            },
        );
    }

    #[test]
    fn test_config_rejects_bad_values() {
        with_env_vars(
            &[("AI4S_SERVICE_URL", "https://x.example.com"), ("AI4S_BEARER_TOKEN", "anon"), ("AI4S_CLIENT_TIMEOUT_SECS", "soon")],
            || assert!(ClientConfig::from_env().is_err()),
        );
        assert!(ClientConfig::new("not a url", DEFAULT_ENDPOINT_PATH, "anon").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("https://x.example.com", DEFAULT_ENDPOINT_PATH, "secret-token").unwrap();
        assert!(!format!("{config:?}").contains("secret-token"));
    }
}

//! Client for the generative-text service (Google Generative Language API).

use std::time::Duration;

use serde_json::{Value, json};

use crate::config::ApiConfig;
use crate::error::AskError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Overrides the configured base URL, mostly for pointing at a local mock.
pub const BASE_URL_ENV: &str = "STUDYDESK_BASE_URL";

/// Resolved settings for one client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a config from the environment.
    ///
    /// The key is read from the variable named by `api.key_env`; the base URL
    /// from `STUDYDESK_BASE_URL` when set, then `api.base_url`.
    pub fn from_env(api: &ApiConfig) -> Result<Self, AskError> {
        let api_key = std::env::var(&api.key_env).ok();
        let env_url = std::env::var(BASE_URL_ENV).ok();
        Self::resolve(api, api_key, env_url.as_deref())
    }

    /// Creates a config from an explicit key, ignoring the environment.
    pub fn new(api: &ApiConfig, api_key: Option<String>) -> Result<Self, AskError> {
        Self::resolve(api, api_key, None)
    }

    fn resolve(
        api: &ApiConfig,
        api_key: Option<String>,
        env_url: Option<&str>,
    ) -> Result<Self, AskError> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AskError::MissingApiKey {
                var: api.key_env.clone(),
            })?;

        let base_url = resolve_base_url(env_url, api.base_url.as_deref())?;

        Ok(Self {
            api_key,
            base_url,
            model: api.model.clone(),
            timeout: Duration::from_secs(api.timeout_secs),
        })
    }
}

fn resolve_base_url(env_url: Option<&str>, config_url: Option<&str>) -> Result<String, AskError> {
    let chosen = [env_url, config_url]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty());

    match chosen {
        Some(url) => {
            url::Url::parse(url).map_err(|source| AskError::InvalidBaseUrl {
                url: url.to_string(),
                source,
            })?;
            Ok(url.trim_end_matches('/').to_string())
        }
        None => Ok(DEFAULT_BASE_URL.to_string()),
    }
}

/// One-shot (non-streaming) client.
pub struct Client {
    config: ClientConfig,
    http: reqwest::Client,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self, AskError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    /// Send one prompt and return the answer text.
    pub async fn generate(&self, prompt: &str) -> Result<String, AskError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        tracing::debug!(%url, model = %self.config.model, "sending prompt");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&build_request(prompt))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, bytes = body.len(), "response received");

        extract_text(status, &body)
    }
}

fn build_request(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    })
}

/// Pull the answer out of a response body.
///
/// An `error.message` payload wins over the status code, so the service's own
/// explanation reaches the user.
pub fn extract_text(status: u16, body: &str) -> Result<String, AskError> {
    let success = (200..300).contains(&status);

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !success => {
            return Err(AskError::Status {
                status,
                body: body.to_string(),
            });
        }
        Err(e) => return Err(AskError::InvalidResponse(e)),
    };

    if let Some(message) = value.pointer("/error/message").and_then(Value::as_str) {
        return Err(AskError::Api {
            status,
            message: message.to_string(),
        });
    }

    if !success {
        return Err(AskError::Status {
            status,
            body: body.to_string(),
        });
    }

    value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(AskError::MissingText)
}

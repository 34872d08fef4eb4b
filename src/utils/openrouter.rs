// src/utils/openrouter.rs

use anyhow::{Context, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::Config;

/// Anything that can answer a prompt on behalf of a model id.
///
/// The collector only depends on this trait; transport and auth stay here.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Sends `system` + `prompt` to `model_id` and returns the raw reply text.
    async fn complete(&self, model_id: &str, system: &str, prompt: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// OpenAI-compatible chat completions client pointed at OpenRouter.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    referer: Option<String>,
    title: Option<String>,
}

impl OpenRouterClient {
    pub fn new(base_url: &Url, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", base_url.as_str().trim_end_matches('/')),
            api_key: api_key.into(),
            referer: None,
            title: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut client = Self::new(&config.base_url, config.api_key.clone());
        client.referer = config.referer.clone();
        client.title = config.title.clone();
        client
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ModelBackend for OpenRouterClient {
    async fn complete(&self, model_id: &str, system: &str, prompt: &str) -> anyhow::Result<String> {
        let body = ChatRequest {
            model: model_id,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let mut request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body);
        if let Some(referer) = &self.referer {
            request = request.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.title {
            request = request.header("X-Title", title);
        }

        let resp = request
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.endpoint))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            bail!("chat API error (status {}): {}", status, error_text);
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .context("chat API returned a malformed body")?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("chat API response missing content")
    }
}

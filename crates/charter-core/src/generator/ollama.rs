//! Ollama generator adapter.
//!
//! Talks to a local Ollama daemon over its HTTP API: `/api/chat` for plan
//! generation (with `format: "json"` so the model is constrained to emit a
//! JSON object) and `/api/tags` for model listing.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use super::trait_def::Generator;

/// Default Ollama daemon address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default model used when none is configured.
pub const DEFAULT_MODEL: &str = "llama3:latest";

/// Default sampling temperature. Low, for consistent plan structure.
pub const DEFAULT_TEMPERATURE: f64 = 0.3;

/// Token cap for a single generation.
const NUM_PREDICT: u32 = 2000;

/// Default request timeout. Local models can be slow to first token.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Generator backed by a local Ollama daemon.
pub struct OllamaGenerator {
    http_client: HttpClient,
    base_url: String,
    model: String,
    temperature: f64,
}

impl std::fmt::Debug for OllamaGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaGenerator")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Builder for [`OllamaGenerator`].
#[derive(Default)]
pub struct OllamaGeneratorBuilder {
    base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f64>,
    timeout_secs: Option<u64>,
}

impl OllamaGeneratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the daemon base URL (defaults to `http://localhost:11434`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the model name (defaults to `llama3:latest`).
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature (defaults to 0.3).
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn build(self) -> Result<OllamaGenerator> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(
                self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ))
            .build()
            .context("failed to build HTTP client")?;

        Ok(OllamaGenerator {
            http_client,
            base_url: self
                .base_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        })
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f64,
    num_predict: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    format: &'a str,
    options: ChatOptions,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

// ---------------------------------------------------------------------------
// Impl
// ---------------------------------------------------------------------------

impl OllamaGenerator {
    /// Create a generator with all defaults.
    pub fn new() -> Result<Self> {
        OllamaGeneratorBuilder::new().build()
    }

    pub fn builder() -> OllamaGeneratorBuilder {
        OllamaGeneratorBuilder::new()
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            stream: false,
            format: "json",
            options: ChatOptions {
                temperature: self.temperature,
                num_predict: NUM_PREDICT,
            },
        };

        let url = format!("{}/api/chat", self.base_url);
        tracing::debug!(model = %self.model, %url, "requesting plan from ollama");

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("failed to reach ollama at {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("ollama returned {status}: {body}");
        }

        let chat: ChatResponse = response
            .json()
            .await
            .context("failed to decode ollama chat response")?;
        Ok(chat.message.content)
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("failed to reach ollama at {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("ollama returned {status}: {body}");
        }

        let tags: TagsResponse = response
            .json()
            .await
            .context("failed to decode ollama tags response")?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

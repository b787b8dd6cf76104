//! Ollama REST API client
//!
//! Talks to an Ollama-compatible `/api/generate` endpoint. Structured
//! output is requested through the `format` field with a JSON schema.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(feature = "llm")]
use anyhow::Context;
#[cfg(feature = "llm")]
use tracing::{debug, info, warn};

/// Ollama client configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Service address, default http://localhost:11434
    pub base_url: String,
    /// Model name, e.g. "llama3.2", "qwen2.5:7b"
    pub model: String,
    /// Default sampling temperature, 0.0-1.0
    pub temperature: f32,
    /// Default generation cap in tokens
    pub max_tokens: u32,
    /// HTTP request timeout (seconds)
    pub timeout_secs: u64,
    /// Bearer token for proxied endpoints; never persisted
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "qwen2.5:7b".to_string(),
            temperature: 0.3,
            max_tokens: 256,
            timeout_secs: 10,
            api_key: None,
        }
    }
}

impl OllamaConfig {
    /// Apply `TTT_LLM_BASE_URL`, `TTT_LLM_MODEL` and `TTT_LLM_API_KEY` as
    /// read through `lookup`. Blank values count as unset.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(url) = get("TTT_LLM_BASE_URL") {
            self.base_url = url;
        }
        if let Some(model) = get("TTT_LLM_MODEL") {
            self.model = model;
        }
        self.api_key = get("TTT_LLM_API_KEY");
        self
    }
}

/// One text-generation call
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system: Option<String>,
    /// JSON schema the output must follow
    pub schema: Option<serde_json::Value>,
    pub temperature: f32,
    /// Output cap; the client default applies when `None`
    pub max_tokens: Option<u32>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            schema: None,
            temperature,
            max_tokens: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Stateless text generation service
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one generation and return the raw output text
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Model identifier sent with every request
    fn model(&self) -> &str;
}

/// Ollama API request body
#[cfg(feature = "llm")]
#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<serde_json::Value>,
    stream: bool,
    options: GenerateOptions,
    /// Disable thinking mode (qwen3 and similar)
    #[serde(skip_serializing_if = "Option::is_none")]
    think: Option<bool>,
}

#[cfg(feature = "llm")]
#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[cfg(feature = "llm")]
impl GenerateRequest {
    fn new(config: &OllamaConfig, request: &GenerationRequest) -> Self {
        let is_qwen3 = config.model.to_lowercase().contains("qwen3");

        Self {
            model: config.model.clone(),
            prompt: request.prompt.clone(),
            system: request.system.clone(),
            format: request.schema.clone(),
            stream: false,
            options: GenerateOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens.unwrap_or(config.max_tokens),
            },
            think: if is_qwen3 { Some(false) } else { None },
        }
    }
}

/// Ollama API response body
#[cfg(feature = "llm")]
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    total_duration: u64,
    #[serde(default)]
    eval_count: u32,
    /// Reasoning models may put their output here
    #[serde(default)]
    thinking: Option<String>,
}

/// Ollama client
#[cfg(feature = "llm")]
pub struct OllamaClient {
    config: OllamaConfig,
    client: reqwest::Client,
}

#[cfg(feature = "llm")]
impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    /// Check that the service answers, using a short-timeout client
    pub async fn health_check(&self) -> Result<()> {
        let url = format!("{}/api/tags", self.config.base_url);

        let health_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(3))
            .build()
            .context("Failed to create health check client")?;

        let resp = self
            .authorize(health_client.get(&url))
            .send()
            .await
            .with_context(|| format!("Cannot reach language model service ({})", self.config.base_url))?;

        if resp.status().is_success() {
            info!("Language model health check passed");
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "Language model service returned {} ({})",
                resp.status(),
                self.config.base_url
            ))
        }
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }
}

#[cfg(feature = "llm")]
#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let url = format!("{}/api/generate", self.config.base_url);

        let body = GenerateRequest::new(&self.config, request);

        debug!(
            "Sending request: model={}, prompt_len={}, temperature={}",
            self.config.model,
            request.prompt.len(),
            request.temperature
        );

        let response = self
            .authorize(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .context("Failed to send generate request")?
            .error_for_status()
            .context("Service rejected generate request")?;

        let response_text = response
            .text()
            .await
            .context("Failed to read response body")?;

        let preview: String = response_text.chars().take(300).collect();
        debug!("Raw service response: {}", preview);

        let resp: GenerateResponse =
            serde_json::from_str(&response_text).context("Failed to parse generate response")?;

        info!(
            "Service response: tokens={}, duration={}ms",
            resp.eval_count,
            resp.total_duration / 1_000_000
        );

        let output = if !resp.response.is_empty() {
            resp.response
        } else if let Some(thinking) = resp.thinking {
            debug!("Using thinking field as response");
            thinking
        } else {
            warn!("Service returned an empty response");
            String::new()
        };

        Ok(output)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

/// Placeholder when the `llm` feature is off: every call fails, so remote
/// tiers fall back to the heuristic.
#[cfg(not(feature = "llm"))]
pub struct OllamaClient {
    config: OllamaConfig,
}

#[cfg(not(feature = "llm"))]
impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub async fn health_check(&self) -> Result<()> {
        anyhow::bail!("LLM feature not enabled. Compile with --features llm")
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }
}

#[cfg(not(feature = "llm"))]
#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
        anyhow::bail!("LLM feature not enabled. Compile with --features llm")
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

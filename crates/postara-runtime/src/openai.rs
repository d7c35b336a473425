//! OpenAI LLM Provider
//!
//! Implementation of `LlmProvider` against the hosted chat-completions
//! endpoint. Bearer-token authenticated JSON; messages serialize directly
//! to the wire format, including multimodal text+image content parts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use postara_core::{
    error::{CaptionError, Result},
    message::Message,
    provider::{Completion, GenerationOptions, LlmProvider, TokenUsage},
};

/// OpenAI provider configuration
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    /// API key (bearer token)
    pub api_key: String,

    /// Optional project id sent as the `OpenAI-Project` header
    pub project_id: Option<String>,

    /// API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            project_id: None,
            base_url: "https://api.openai.com/v1".into(),
            timeout_secs: 60,
        }
    }

    /// Create from environment variables.
    ///
    /// `OPENAI_API_KEY` is required; `OPENAI_PROJECT_ID` and
    /// `OPENAI_BASE_URL` are optional overrides.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| CaptionError::Config("OPENAI_API_KEY not set".into()))?;

        let mut config = Self::new(api_key);
        config.project_id = std::env::var("OPENAI_PROJECT_ID").ok();
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }

        Ok(config)
    }
}

/// OpenAI completion provider
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: OpenAiConfig,
}

// Wire types for the chat-completions endpoint

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<UsageWire>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct UsageWire {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

impl OpenAiProvider {
    /// Create from configuration
    pub fn from_config(config: OpenAiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CaptionError::Config(format!("HTTP client build failed: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(OpenAiConfig::from_env()?)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.bearer_auth(&self.config.api_key);
        match &self.config.project_id {
            Some(project) => builder.header("OpenAI-Project", project),
            None => builder,
        }
    }

    /// Pull the upstream error message out of a non-success body, if present
    fn upstream_message(status: reqwest::StatusCode, body: &str) -> String {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) if !parsed.error.message.is_empty() => parsed.error.message,
            _ => format!("Upstream HTTP {}", status),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/models", self.config.base_url);
        match self.authed(self.client.get(&url)).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                tracing::warn!("OpenAI health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request = ChatRequest {
            model: &options.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response = self
            .authed(self.client.post(&url))
            .json(&request)
            .send()
            .await
            .map_err(|e| CaptionError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CaptionError::Provider(e.to_string()))?;

        if !status.is_success() {
            return Err(CaptionError::Provider(Self::upstream_message(
                status, &body,
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| CaptionError::Parse {
            message: format!("Malformed completion response: {}", e),
            raw: Some(body.clone()),
        })?;

        let content = parsed
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| CaptionError::Parse {
                message: "Completion contained no choices".into(),
                raw: Some(body.clone()),
            })?;

        Ok(Completion {
            content,
            model: parsed.model.unwrap_or_else(|| options.model.clone()),
            usage: parsed.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}

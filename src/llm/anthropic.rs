//! Anthropic Messages API generator
//!
//! Implements [`TextGenerator`] over the Anthropic (Claude) API. Each call
//! is a single stateless request: system prompt plus one user message.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use super::LlmSettings;
use crate::error::GenerationError;
use crate::refine::{PromptContext, TextGenerator};

/// Anthropic API base URL
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

pub struct AnthropicGenerator {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicGenerator {
    /// Create a generator, reading the API key from the environment
    pub fn new(settings: &LlmSettings) -> Result<Self, GenerationError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| GenerationError::MissingApiKey {
            env_var: API_KEY_ENV.to_string(),
        })?;
        Self::with_api_key(api_key, settings)
    }

    /// Create a generator with an explicit API key
    pub fn with_api_key(api_key: impl Into<String>, settings: &LlmSettings) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|e| GenerationError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the request body for the Messages API
    fn build_request(&self, context: &PromptContext) -> Value {
        json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": context.system_prompt(),
            "messages": [
                { "role": "user", "content": context.render() }
            ]
        })
    }

    /// Concatenate the text blocks of a response
    fn parse_response(body: &Value) -> Result<String, GenerationError> {
        let blocks = body["content"]
            .as_array()
            .ok_or_else(|| GenerationError::InvalidResponse("missing content array".to_string()))?;

        let text = blocks
            .iter()
            .filter(|block| block["type"].as_str() == Some("text"))
            .filter_map(|block| block["text"].as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if text.trim().is_empty() {
            return Err(GenerationError::InvalidResponse("no text in response".to_string()));
        }
        Ok(text)
    }

    /// Send a request to the Messages API
    async fn send_request(&self, body: Value) -> Result<Value, GenerationError> {
        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl TextGenerator for AnthropicGenerator {
    async fn generate(&self, context: &PromptContext) -> Result<String, GenerationError> {
        let body = self.build_request(context);
        tracing::debug!(model = %self.model, kind = context.kind.as_str(), "Sending generation request");
        let response = self.send_request(body).await?;
        Self::parse_response(&response)
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

// Keep the API key out of debug output
impl std::fmt::Debug for AnthropicGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicGenerator")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

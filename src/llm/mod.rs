//! LLM-backed text generation.

pub mod anthropic;

use serde::{Deserialize, Serialize};

pub use anthropic::{API_KEY_ENV, AnthropicGenerator};

/// Default model to use
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub model: String,
    pub max_tokens: u32,
    /// HTTP timeout for one API call
    pub timeout_ms: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 2048,
            timeout_ms: 120_000,
        }
    }
}

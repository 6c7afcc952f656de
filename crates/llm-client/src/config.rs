//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::options::{
    CompletionOptions, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT,
};

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn max_output_tokens(&self) -> u32;
    fn temperature(&self) -> f32;
    fn timeout(&self) -> Duration;
    fn system_prompt(&self) -> Option<&str>;

    /// Options passed to the gateway on every call.
    fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            model: self.model().to_string(),
            max_output_tokens: self.max_output_tokens(),
            temperature: self.temperature(),
            timeout: self.timeout(),
        }
    }
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_model: String,
    pub llm_max_output_tokens: u32,
    pub llm_temperature: f32,
    pub llm_timeout_secs: u64,
    pub llm_system_prompt: Option<String>,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn max_output_tokens(&self) -> u32 {
        self.llm_max_output_tokens
    }
    fn temperature(&self) -> f32 {
        self.llm_temperature
    }
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
    fn system_prompt(&self) -> Option<&str> {
        self.llm_system_prompt.as_deref()
    }
}

impl EnvLlmConfig {
    /// Load from environment variables. `OPENAI_API_KEY` is required; everything else has defaults.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let llm_model = env::var("MODEL")
            .or_else(|_| env::var("OPENAI_MODEL"))
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let llm_max_output_tokens = env::var("MAX_OUTPUT_TOKENS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS);
        let llm_temperature = env::var("TEMPERATURE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);
        let llm_timeout_secs = env::var("COMPLETION_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT.as_secs());
        let llm_system_prompt = env::var("LLM_SYSTEM_PROMPT")
            .or_else(|_| env::var("SYSTEM_PROMPT"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        Ok(Self {
            openai_api_key,
            openai_base_url,
            llm_model,
            llm_max_output_tokens,
            llm_temperature,
            llm_timeout_secs,
            llm_system_prompt,
        })
    }

    /// Fails fast on values the completion service would reject.
    pub fn validate(&self) -> Result<()> {
        self.completion_options()
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid LLM config: {}", e))
    }
}

//! BotConfig: BaseConfig + LLM config + session config. Use load() for env-based loading.

use anyhow::Result;
use llm_client::{EnvLlmConfig, LlmConfig};

use super::{BaseConfig, SessionConfig};

/// Bot config. Use BotConfig::load() for env-based loading, then validate().
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub llm: EnvLlmConfig,
    pub session: SessionConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Fails when BOT_TOKEN or OPENAI_API_KEY is missing.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let llm = EnvLlmConfig::from_env()?;
        let session = SessionConfig::from_env()?;
        Ok(Self { base, llm, session })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.llm.validate()?;
        self.session.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn llm(&self) -> &EnvLlmConfig {
        &self.llm
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn history_limit(&self) -> usize {
        self.session.history_limit
    }
    pub fn model(&self) -> &str {
        self.llm.model()
    }
}

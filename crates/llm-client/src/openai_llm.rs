//! OpenAI implementation of [`LlmClient`]: wraps openai-client, prepends the optional system
//! message, and classifies failures.

use async_trait::async_trait;
use openai_client::{ChatCompletionRequestMessage, SamplingParams};
use prompt::ChatMessage;
use tracing::{error, instrument, warn};

use super::{chat_message_to_openai, LlmClient};
use crate::classify::classify_openai_error;
use crate::config::LlmConfig;
use crate::error::CompletionError;
use crate::options::CompletionOptions;

/// LlmClient backed by openai-client.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    system_prompt: Option<String>,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key),
            system_prompt: None,
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            system_prompt: None,
        }
    }

    /// Builds a client from config (key, base URL, system prompt).
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_system_prompt_opt(config.system_prompt().map(str::to_string))
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    fn build_messages(
        &self,
        messages: &[ChatMessage],
    ) -> Result<Vec<ChatCompletionRequestMessage>, CompletionError> {
        let system = self.system_prompt.as_deref().map(ChatMessage::system);
        system
            .iter()
            .chain(messages.iter())
            .map(|m| {
                chat_message_to_openai(m)
                    .map_err(|e| CompletionError::InvalidRequest(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages, options), fields(model = %options.model))]
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        let openai_messages = self.build_messages(&messages)?;
        let params = SamplingParams {
            max_tokens: options.max_output_tokens,
            temperature: options.temperature,
        };

        match self
            .client
            .chat_completion(&options.model, openai_messages, params)
            .await
        {
            Ok(Some(text)) if !text.trim().is_empty() => Ok(text),
            Ok(_) => {
                warn!("OpenAI returned no content");
                Err(CompletionError::EmptyReply)
            }
            Err(e) => {
                let classified = classify_openai_error(&e);
                error!(error = %e, classified = ?classified.kind(), "OpenAI chat_completion failed");
                Err(classified)
            }
        }
    }
}

//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait, an OpenAI implementation, the error taxonomy and the
//! [`CompletionGateway`] the dispatch pipeline talks to.
//!
//! Upstream errors are classified once, inside the client implementation, into
//! [`CompletionError`]; the gateway adds the deadline and the empty-reply substitution.

use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs, OpenAIError,
};
use prompt::{ChatMessage, MessageRole};

pub mod classify;
mod config;
mod error;
mod gateway;
mod openai_llm;
mod options;

pub use config::{EnvLlmConfig, LlmConfig};
pub use error::{CompletionError, FailureKind};
pub use gateway::{Completion, CompletionGateway, DEFAULT_EMPTY_REPLY_FALLBACK};
pub use openai_llm::OpenAILlmClient;
pub use options::{
    CompletionOptions, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT,
};

/// LLM client interface: one completion for an ordered message list.
///
/// Implementations own the mapping of their transport's errors to [`CompletionError`] and must
/// return [`CompletionError::EmptyReply`] when the service answers without content.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text for the given messages (oldest first).
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, OpenAIError> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}

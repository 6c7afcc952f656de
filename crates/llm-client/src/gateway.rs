//! [`CompletionGateway`]: the single entry point the dispatch pipeline uses to reach the
//! completion service. Validates the request, bounds the call with a deadline, and substitutes
//! a fixed text for empty replies.

use prompt::{ends_with_user_turn, ChatMessage};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::error::CompletionError;
use crate::options::CompletionOptions;
use crate::LlmClient;

/// Text used when the service answers successfully but without content.
pub const DEFAULT_EMPTY_REPLY_FALLBACK: &str =
    "The model returned an empty reply. Try rephrasing your request.";

/// Result of a successful gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Text produced by the model.
    Generated(String),
    /// Fixed substitute for an empty reply; not model output.
    Fallback(String),
}

impl Completion {
    pub fn text(&self) -> &str {
        match self {
            Completion::Generated(t) | Completion::Fallback(t) => t,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Completion::Generated(_))
    }
}

/// Stateless wrapper around an [`LlmClient`]. Holds only the client and the fallback text.
#[derive(Clone)]
pub struct CompletionGateway {
    client: Arc<dyn LlmClient>,
    empty_reply_fallback: String,
}

impl CompletionGateway {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            empty_reply_fallback: DEFAULT_EMPTY_REPLY_FALLBACK.to_string(),
        }
    }

    pub fn with_empty_reply_fallback(mut self, text: impl Into<String>) -> Self {
        self.empty_reply_fallback = text.into();
        self
    }

    /// Requests a completion for `messages` (oldest first, last one from the user).
    ///
    /// On deadline expiry the client future is dropped, which aborts the in-flight HTTP request,
    /// and [`CompletionError::Timeout`] is returned.
    #[instrument(skip(self, messages, options), fields(message_count = messages.len(), model = %options.model))]
    pub async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: &CompletionOptions,
    ) -> Result<Completion, CompletionError> {
        if !ends_with_user_turn(&messages) {
            warn!("Rejected completion request: history must end with a user message");
            return Err(CompletionError::InvalidRequest(
                "messages must be non-empty and end with a user message".into(),
            ));
        }
        options.validate()?;

        let started = Instant::now();
        let result = tokio::time::timeout(options.timeout, self.client.complete(messages, options)).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Err(_) => {
                warn!(
                    elapsed_ms,
                    timeout_secs = options.timeout.as_secs_f64(),
                    "Completion deadline exceeded; call abandoned"
                );
                Err(CompletionError::Timeout)
            }
            Ok(Ok(text)) if !text.trim().is_empty() => {
                info!(elapsed_ms, reply_len = text.len(), "Completion received");
                Ok(Completion::Generated(text))
            }
            Ok(Ok(_)) | Ok(Err(CompletionError::EmptyReply)) => {
                warn!(elapsed_ms, "Empty completion; substituting fallback text");
                Ok(Completion::Fallback(self.empty_reply_fallback.clone()))
            }
            Ok(Err(e)) => {
                warn!(elapsed_ms, error = %e, kind = ?e.kind(), "Completion failed");
                Err(e)
            }
        }
    }
}

//! Scripted [`llm_client::LlmClient`] for gateway tests: returns queued results, records the
//! messages it was called with, and can be made slow.

use async_trait::async_trait;
use llm_client::{CompletionError, CompletionOptions, LlmClient};
use prompt::ChatMessage;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

pub struct ScriptedLlmClient {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
    delay: Option<Duration>,
}

#[allow(dead_code)]
impl ScriptedLlmClient {
    pub fn new(replies: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        _options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(messages);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::Upstream("no scripted reply".into())))
    }
}

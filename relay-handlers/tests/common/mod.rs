//! Test doubles shared by the relay-handlers integration tests: a recording [`Bot`], a scripted
//! [`LlmClient`], and message builders.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use llm_client::{CompletionError, CompletionGateway, CompletionOptions, LlmClient};
use prompt::ChatMessage;
use relay_core::{Bot, Chat, Message, RelayError, User};
use relay_handlers::DispatchPipeline;
use session_store::SessionStore;

/// One message sent through [`MockBot`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sent {
    pub chat_id: i64,
    pub text: String,
    pub quick_replies: Vec<String>,
}

/// Records every send; optionally fails all sends (after recording the attempt).
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Sent>>,
    typing: Mutex<usize>,
    fail_sends: bool,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|s| s.text).collect()
    }

    pub fn typing_count(&self) -> usize {
        *self.typing.lock().unwrap()
    }

    fn record(&self, chat: &Chat, text: &str, quick_replies: &[String]) -> relay_core::Result<()> {
        self.sent.lock().unwrap().push(Sent {
            chat_id: chat.id,
            text: text.to_string(),
            quick_replies: quick_replies.to_vec(),
        });
        if self.fail_sends {
            return Err(RelayError::Bot("chat not found".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> relay_core::Result<()> {
        self.record(chat, text, &[])
    }

    async fn send_message_with_options(
        &self,
        chat: &Chat,
        text: &str,
        quick_replies: &[String],
    ) -> relay_core::Result<()> {
        self.record(chat, text, quick_replies)
    }

    async fn send_typing(&self, _chat: &Chat) -> relay_core::Result<()> {
        *self.typing.lock().unwrap() += 1;
        Ok(())
    }
}

/// Returns queued results in order and records the history it was called with.
pub struct ScriptedLlmClient {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
    delay: Option<Duration>,
}

impl ScriptedLlmClient {
    pub fn new(replies: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn replying(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
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

/// Builds an incoming private-chat text message from `user_id` (chat id = user id).
pub fn text_message(user_id: i64, content: &str) -> Message {
    Message {
        id: format!("{}-{}", user_id, content.len()),
        user: User {
            id: user_id,
            username: Some(format!("user{}", user_id)),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: user_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        created_at: Utc::now(),
    }
}

/// Pipeline wired to the given doubles, history limit 10, default options.
pub fn pipeline(client: Arc<ScriptedLlmClient>, bot: Arc<MockBot>) -> DispatchPipeline {
    pipeline_with(client, bot, SessionStore::new(10), CompletionOptions::default())
}

pub fn pipeline_with(
    client: Arc<ScriptedLlmClient>,
    bot: Arc<MockBot>,
    sessions: SessionStore,
    options: CompletionOptions,
) -> DispatchPipeline {
    DispatchPipeline::new(sessions, CompletionGateway::new(client), bot, options)
}

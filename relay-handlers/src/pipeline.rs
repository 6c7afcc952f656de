//! Dispatch pipeline: one inbound text message through session history, completion and reply.
//!
//! Stages per message: `Received → HistoryAppended → AwaitingCompletion → Completed | Failed →
//! Replied`. Each transition is logged with the user id and the stage name.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use llm_client::{Completion, CompletionGateway, CompletionOptions, FailureKind};
use prompt::MessageRole;
use relay_core::{Bot, Chat, Handler, HandlerResponse, Message, Result};
use session_store::SessionStore;
use tracing::{debug, error, info, instrument, warn};

use crate::replies;

/// Processing stage of a single inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStage {
    Received,
    HistoryAppended,
    AwaitingCompletion,
    Completed,
    Failed,
    Replied,
}

impl fmt::Display for DispatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DispatchStage::Received => "received",
            DispatchStage::HistoryAppended => "history_appended",
            DispatchStage::AwaitingCompletion => "awaiting_completion",
            DispatchStage::Completed => "completed",
            DispatchStage::Failed => "failed",
            DispatchStage::Replied => "replied",
        };
        f.write_str(s)
    }
}

/// Result of [`DispatchPipeline::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Blank input; nothing stored, nothing sent.
    Skipped,
    /// A model reply (or the empty-reply fallback) was produced and sent.
    Replied { text: String },
    /// The completion failed; the kind-specific message was sent.
    Failed { kind: FailureKind },
}

/// Drives one message through the session store and the completion gateway.
///
/// Assumes messages of the same user arrive one at a time; the Telegram transport serializes them
/// per user. Concurrent dispatches for one user may interleave their history appends.
#[derive(Clone)]
pub struct DispatchPipeline {
    sessions: SessionStore,
    gateway: CompletionGateway,
    bot: Arc<dyn Bot>,
    options: CompletionOptions,
}

impl DispatchPipeline {
    pub fn new(
        sessions: SessionStore,
        gateway: CompletionGateway,
        bot: Arc<dyn Bot>,
        options: CompletionOptions,
    ) -> Self {
        Self {
            sessions,
            gateway,
            bot,
            options,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }

    fn enter(user_id: i64, stage: DispatchStage) {
        debug!(user_id, stage = %stage, "dispatch stage");
    }

    /// Sends `text` to `chat`. Delivery failures are logged and swallowed.
    async fn deliver(&self, chat: &Chat, user_id: i64, text: &str) {
        if let Err(e) = self.bot.send_message(chat, text).await {
            error!(user_id, chat_id = chat.id, error = %e, "Failed to deliver reply");
        }
    }

    /// Processes one inbound message and sends the resulting reply.
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    pub async fn dispatch(&self, message: &Message) -> DispatchOutcome {
        let user_id = message.user.id;
        Self::enter(user_id, DispatchStage::Received);

        if message.content.trim().is_empty() {
            debug!(user_id, "Blank message skipped");
            return DispatchOutcome::Skipped;
        }

        let history_len = self
            .sessions
            .append(user_id, MessageRole::User, message.content.as_str());
        Self::enter(user_id, DispatchStage::HistoryAppended);

        let snapshot = self.sessions.snapshot(user_id);
        Self::enter(user_id, DispatchStage::AwaitingCompletion);
        info!(
            user_id,
            history_len,
            message_count = snapshot.len(),
            "Requesting completion"
        );
        if let Err(e) = self.bot.send_typing(&message.chat).await {
            warn!(user_id, error = %e, "Failed to send typing indicator");
        }

        let outcome = match self.gateway.complete(snapshot, &self.options).await {
            Ok(completion) => {
                Self::enter(user_id, DispatchStage::Completed);
                if let Completion::Generated(ref reply) = completion {
                    self.sessions.append(user_id, MessageRole::Assistant, reply);
                }
                let reply = completion.text().to_string();
                self.deliver(&message.chat, user_id, &reply).await;
                DispatchOutcome::Replied { text: reply }
            }
            Err(e) => {
                Self::enter(user_id, DispatchStage::Failed);
                let kind = e.kind().unwrap_or(FailureKind::UpstreamError);
                warn!(user_id, kind = %kind, error = %e, "Completion failed");
                self.deliver(&message.chat, user_id, replies::user_message(kind))
                    .await;
                DispatchOutcome::Failed { kind }
            }
        };

        Self::enter(user_id, DispatchStage::Replied);
        info!(user_id, outcome = ?outcome, "Message dispatched");
        outcome
    }

    /// Clears the user's history and confirms, without calling the gateway.
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    pub async fn reset_session(&self, message: &Message) {
        self.sessions.reset(message.user.id);
        info!(user_id = message.user.id, "Session reset");
        self.deliver(&message.chat, message.user.id, replies::RESET_CONFIRMATION)
            .await;
    }
}

#[async_trait]
impl Handler for DispatchPipeline {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        Ok(match self.dispatch(message).await {
            DispatchOutcome::Replied { text } => HandlerResponse::Reply(text),
            DispatchOutcome::Skipped | DispatchOutcome::Failed { .. } => HandlerResponse::Stop,
        })
    }
}

//! Bot abstraction for sending replies.
//!
//! [`Bot`] is transport-agnostic; the Telegram crate implements it via teloxide and tests
//! substitute recording mocks.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Abstraction for sending messages back to users. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a text message with quick-reply controls (one button per label, in order).
    async fn send_message_with_options(
        &self,
        chat: &Chat,
        text: &str,
        quick_replies: &[String],
    ) -> Result<()>;

    /// Shows a "typing" indicator in the chat. Best-effort; the default does nothing.
    async fn send_typing(&self, _chat: &Chat) -> Result<()> {
        Ok(())
    }

    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    /// Sends a reply with quick-reply controls to the given message (same chat).
    async fn reply_with_options(
        &self,
        message: &Message,
        text: &str,
        quick_replies: &[String],
    ) -> Result<()> {
        self.send_message_with_options(&message.chat, text, quick_replies)
            .await
    }
}

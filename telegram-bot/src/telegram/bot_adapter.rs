//! Wraps teloxide::Bot and implements [`relay_core::Bot`]. Production code sends messages via Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use relay_core::{Bot as CoreBot, Chat, RelayError, Result};
use teloxide::prelude::*;
use teloxide::types::{ChatAction, KeyboardButton, KeyboardMarkup};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// One-row reply keyboard, one button per label, resized to fit.
    fn keyboard(labels: &[String]) -> KeyboardMarkup {
        let row: Vec<KeyboardButton> = labels.iter().map(KeyboardButton::new).collect();
        KeyboardMarkup::new(vec![row]).resize_keyboard()
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| RelayError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_message_with_options(
        &self,
        chat: &Chat,
        text: &str,
        quick_replies: &[String],
    ) -> Result<()> {
        if quick_replies.is_empty() {
            return self.send_message(chat, text).await;
        }
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(Self::keyboard(quick_replies))
            .await
            .map_err(|e| RelayError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat.id), ChatAction::Typing)
            .await
            .map_err(|e| RelayError::Bot(e.to_string()))?;
        Ok(())
    }
}

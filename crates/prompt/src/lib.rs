//! # Prompt
//!
//! Chat message value types, one-to-one with elements of the OpenAI Chat Completions `messages`
//! array. Sessions store them, the completion gateway sends them.
//!
//! ## External interactions
//!
//! - **AI models**: messages are converted to the upstream request format by `llm-client`.

use std::fmt;

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`). Only prepended by the client, never stored in a session.
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

impl MessageRole {
    /// API wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chat message. Immutable value; no identity beyond its position in a history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

/// Returns true if `messages` is non-empty and its last element is a User message.
///
/// This is the precondition for sending a history to the completion service: the model must be
/// answering a user turn.
pub fn ends_with_user_turn(messages: &[ChatMessage]) -> bool {
    messages.last().map(ChatMessage::is_user).unwrap_or(false)
}

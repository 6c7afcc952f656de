//! Error types for the bot core.

use thiserror::Error;

/// Top-level error for the relay core.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The transport failed to deliver a message (send, keyboard, chat action).
    #[error("Bot error: {0}")]
    Bot(String),
}

/// Result type for core operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;

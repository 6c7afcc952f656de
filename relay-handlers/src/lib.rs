//! # relay-handlers
//!
//! Handlers run by the relay bot's [`relay_core::HandlerChain`]:
//!
//! - [`CommandHandler`]: `/start`, `/help`, `/reset` and the "New request" button.
//! - [`DispatchPipeline`]: appends the user's text to their session, asks the completion gateway
//!   for a reply, records it and sends it back.
//!
//! User-facing texts live in [`replies`].

mod commands;
mod pipeline;
pub mod replies;

pub use commands::{Command, CommandHandler};
pub use pipeline::{DispatchOutcome, DispatchPipeline, DispatchStage};

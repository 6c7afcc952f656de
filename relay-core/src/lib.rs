//! # relay-core
//!
//! Core types and traits for the relay bot: [`Bot`], [`Handler`], [`HandlerChain`], message and
//! user types, errors, and tracing initialization. Transport-agnostic; the Telegram crate
//! implements [`Bot`] and converts its updates into [`Message`].

pub mod bot;
pub mod chain;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use chain::HandlerChain;
pub use error::{RelayError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User,
};

//! Telegram layer: adapters to core types, Bot implementation, per-user queues, REPL runner.

mod adapters;
mod bot_adapter;
mod queue;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use queue::UserQueues;
pub use runner::run_repl;

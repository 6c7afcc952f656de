//! # Telegram relay bot
//!
//! Wires the session store, completion gateway and handlers into a Telegram bot. Loads config
//! from env and runs the REPL.

pub mod cli;
pub mod components;
pub mod config;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, build_teloxide_bot, BotComponents};
pub use config::{BaseConfig, BotConfig, SessionConfig};
pub use runner::{run_bot, RelayBot};
pub use telegram::{
    run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper, UserQueues,
};

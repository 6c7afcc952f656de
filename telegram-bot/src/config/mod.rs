//! Bot configuration: BaseConfig (Telegram + log) + LLM config + session config.

mod base;
mod bot_config;
mod session;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use session::SessionConfig;

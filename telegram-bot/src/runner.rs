use anyhow::Result;
use relay_core::{init_tracing, Bot, HandlerChain, Message as CoreMessage};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::components::{build_bot_components, build_handler_chain, BotComponents};
use crate::config::BotConfig;
use crate::telegram::run_repl;

/// RelayBot: config, components, and handler chain.
pub struct RelayBot {
    pub config: BotConfig,
    pub components: BotComponents,
    pub handler_chain: HandlerChain,
}

impl RelayBot {
    /// Creates a RelayBot replying through Telegram.
    pub fn new(config: BotConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// Creates a RelayBot that replies through `bot` (e.g. a recording mock in tests).
    pub fn new_with_bot(config: BotConfig, bot: Arc<dyn Bot>) -> Result<Self> {
        Self::build(config, Some(bot))
    }

    fn build(config: BotConfig, bot_override: Option<Arc<dyn Bot>>) -> Result<Self> {
        config.validate()?;
        let components = build_bot_components(&config, bot_override)?;
        let handler_chain = build_handler_chain(&components);
        Ok(Self {
            config,
            components,
            handler_chain,
        })
    }

    /// Drives the handler chain with a core Message. Chain errors are logged, not returned.
    pub async fn handle_core_message(&self, message: &CoreMessage) -> Result<()> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            "Handling message"
        );
        if let Err(e) = self.handler_chain.handle(message).await {
            error!(error = %e, user_id = message.user.id, "Handler chain failed");
        }
        Ok(())
    }
}

/// Main entry: validate config, init logging, build components, then run the REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        model = %config.model(),
        history_limit = config.history_limit(),
        "Initializing bot"
    );

    let bot = RelayBot::new(config)?;
    let teloxide_bot = bot.components.teloxide_bot.clone();

    info!("Bot started successfully");

    run_repl(teloxide_bot, bot.handler_chain).await
}

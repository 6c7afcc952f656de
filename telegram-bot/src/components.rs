//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use anyhow::{Context, Result};
use llm_client::{CompletionGateway, LlmClient, LlmConfig, OpenAILlmClient};
use openai_client::mask_token;
use relay_core::{Bot as CoreBot, HandlerChain};
use relay_handlers::{CommandHandler, DispatchPipeline};
use session_store::SessionStore;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::{BaseConfig, BotConfig};
use crate::telegram::TelegramBotAdapter;

/// Core dependencies for run_bot / RelayBot; produced by the component factory.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    /// Bot used by the handlers to reply. The Telegram adapter unless overridden (tests).
    pub bot: Arc<dyn CoreBot>,
    pub sessions: SessionStore,
    pub pipeline: DispatchPipeline,
}

/// Creates the teloxide Bot, pointing it at TELEGRAM_API_URL when set.
pub fn build_teloxide_bot(base: &BaseConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(base.bot_token.clone());
    match base.telegram_api_url {
        Some(ref url_str) => {
            let url = reqwest::Url::parse(url_str)
                .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url_str))?;
            info!(url = %url_str, "Using custom Telegram API URL");
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Builds BotComponents. When `bot_override` is `Some`, handlers reply through it instead of Telegram.
#[instrument(skip(config, bot_override))]
pub fn build_bot_components(
    config: &BotConfig,
    bot_override: Option<Arc<dyn CoreBot>>,
) -> Result<BotComponents> {
    let teloxide_bot = build_teloxide_bot(config.base())?;
    let bot: Arc<dyn CoreBot> = match bot_override {
        Some(b) => b,
        None => Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
    };

    let llm = config.llm();
    info!(
        base_url = %llm.base_url(),
        api_key = %mask_token(llm.api_key()),
        model = %llm.model(),
        history_limit = config.history_limit(),
        "Building relay components"
    );
    let llm_client: Arc<dyn LlmClient> = Arc::new(OpenAILlmClient::from_config(llm));
    let gateway = CompletionGateway::new(llm_client);
    let sessions = SessionStore::new(config.history_limit());
    let pipeline = DispatchPipeline::new(
        sessions.clone(),
        gateway,
        bot.clone(),
        llm.completion_options(),
    );

    Ok(BotComponents {
        teloxide_bot,
        bot,
        sessions,
        pipeline,
    })
}

/// Builds the handler chain: commands first, then the dispatch pipeline.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(CommandHandler::new(
            components.pipeline.clone(),
            components.bot.clone(),
        )))
        .add_handler(Arc::new(components.pipeline.clone()))
}

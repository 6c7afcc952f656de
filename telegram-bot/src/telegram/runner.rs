//! REPL runner: converts teloxide text messages to core messages and feeds them into per-user queues.

use anyhow::Result;
use relay_core::{HandlerChain, ToCoreMessage};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, instrument, warn};

use super::adapters::TelegramMessageWrapper;
use super::queue::UserQueues;

/// Starts the REPL with the given teloxide Bot and HandlerChain.
/// Calls get_me() first to log the bot identity; each text message with a sender is queued for its user so one
/// user's messages are handled in order while the REPL keeps accepting updates.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(
            username = ?me.user.username,
            bot_id = me.user.id.0,
            "Bot identity resolved"
        ),
        Err(e) => warn!(error = %e, "get_me failed; continuing"),
    }

    let queues = Arc::new(UserQueues::new(handler_chain));
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let queues = queues.clone();

        async move {
            let wrapper = TelegramMessageWrapper(&msg);
            if !wrapper.is_relayable() {
                info!(
                    chat_id = msg.chat.id.0,
                    has_text = msg.text().is_some(),
                    has_sender = msg.from.is_some(),
                    "Ignoring message without text or sender"
                );
                return respond(());
            }
            let core_msg = wrapper.to_core();
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_id = %core_msg.id,
                "Received message"
            );
            queues.enqueue(core_msg);
            respond(())
        }
    })
    .await;

    Ok(())
}

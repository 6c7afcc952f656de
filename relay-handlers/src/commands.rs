//! Control inputs: `/start`, `/help`, `/reset`, the "New request" button and unknown commands.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::{Bot, Handler, HandlerResponse, Message, Result};
use tracing::{error, info, instrument};

use crate::pipeline::DispatchPipeline;
use crate::replies;

/// A recognized control input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Reset,
    /// A slash command the bot does not know (name without the leading slash).
    Unknown(String),
}

impl Command {
    /// Parses `text` as a control input. Returns `None` for ordinary messages.
    ///
    /// Accepts `/cmd`, `/cmd@botname` and trailing arguments; the "New request" button is `Reset`.
    pub fn parse(text: &str) -> Option<Command> {
        let text = text.trim();
        if text == replies::NEW_REQUEST_LABEL {
            return Some(Command::Reset);
        }
        let body = text.strip_prefix('/')?;
        let token = body.split_whitespace().next().unwrap_or("");
        let name = token.split('@').next().unwrap_or("").to_lowercase();
        Some(match name.as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "reset" => Command::Reset,
            _ => Command::Unknown(name),
        })
    }
}

/// Answers control inputs and stops the chain; passes everything else on with `Continue`.
#[derive(Clone)]
pub struct CommandHandler {
    pipeline: DispatchPipeline,
    bot: Arc<dyn Bot>,
}

impl CommandHandler {
    pub fn new(pipeline: DispatchPipeline, bot: Arc<dyn Bot>) -> Self {
        Self { pipeline, bot }
    }

    async fn start(&self, message: &Message) {
        self.pipeline.sessions().reset(message.user.id);
        let options = [replies::NEW_REQUEST_LABEL.to_string()];
        if let Err(e) = self
            .bot
            .reply_with_options(message, replies::WELCOME, &options)
            .await
        {
            error!(user_id = message.user.id, error = %e, "Failed to send welcome");
        }
    }

    async fn reply(&self, message: &Message, text: &str) {
        if let Err(e) = self.bot.reply_to(message, text).await {
            error!(user_id = message.user.id, error = %e, "Failed to send command reply");
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(command) = Command::parse(&message.content) else {
            return Ok(HandlerResponse::Continue);
        };
        info!(user_id = message.user.id, command = ?command, "Control command");

        match command {
            Command::Start => self.start(message).await,
            Command::Help => self.reply(message, replies::HELP).await,
            Command::Reset => self.pipeline.reset_session(message).await,
            Command::Unknown(_) => self.reply(message, replies::UNKNOWN_COMMAND).await,
        }
        Ok(HandlerResponse::Stop)
    }
}

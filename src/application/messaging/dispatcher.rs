//! Message dispatcher - Routes messages to handlers

use crate::application::commands::greeting_reply;
use crate::application::errors::BotError;
use crate::application::services::CommandService;
use crate::domain::entities::{Content, Message, Reply};
use crate::domain::traits::{Chooser, MediaSource};
use crate::infrastructure::config::{BotConfig, GreetingConfig};
use super::context::Context;
use super::parser::MessageParser;

/// Routes one message to a command handler or the greeting auto-reply
pub struct MessageDispatcher {
    parser: MessageParser,
    commands: CommandService,
    bot: BotConfig,
    greetings: GreetingConfig,
    chooser: Box<dyn Chooser>,
}

impl MessageDispatcher {
    pub fn new(
        bot: BotConfig,
        greetings: GreetingConfig,
        commands: CommandService,
        chooser: Box<dyn Chooser>,
    ) -> Self {
        let keywords = greetings.keywords.iter().map(|k| k.to_lowercase()).collect();
        Self {
            parser: MessageParser::new(bot.prefix.clone()),
            commands,
            bot,
            greetings: GreetingConfig {
                keywords,
                replies: greetings.replies,
            },
            chooser,
        }
    }

    /// Produce the reply for a message, quoting it. `None` means stay silent.
    pub async fn dispatch(
        &self,
        message: &Message,
        media: &dyn MediaSource,
    ) -> Result<Option<Reply>, BotError> {
        let reply = match self.parser.parse_message(message) {
            Content::Empty => return Ok(None),
            Content::Command { name, args } => {
                tracing::debug!("[{}] command /{} {:?}", message.chat, name, args);
                let ctx = Context {
                    message,
                    command: &name,
                    args: &args,
                    bot: &self.bot,
                    commands: self.commands.registry(),
                    chooser: self.chooser.as_ref(),
                    media,
                };
                Some(self.commands.handle(&ctx).await?)
            }
            Content::Text(text) => self.auto_reply(&text),
        };

        Ok(reply.map(|r| r.quoting(message.id.clone())))
    }

    fn auto_reply(&self, text: &str) -> Option<Reply> {
        if !self.is_greeting(text) {
            return None;
        }
        greeting_reply(&self.greetings.replies, self.chooser.as_ref())
    }

    /// Case-insensitive substring match against the greeting keywords
    pub fn is_greeting(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.greetings.keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}

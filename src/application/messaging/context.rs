//! Per-invocation context handed to command handlers

use crate::domain::entities::{CommandRegistry, Jid, Message};
use crate::domain::traits::{Chooser, MediaSource};
use crate::infrastructure::config::BotConfig;

/// Everything a handler may read while producing a reply
pub struct Context<'a> {
    pub message: &'a Message,
    pub command: &'a str,
    pub args: &'a [String],
    pub bot: &'a BotConfig,
    pub commands: &'a CommandRegistry,
    pub chooser: &'a dyn Chooser,
    pub media: &'a dyn MediaSource,
}

impl<'a> Context<'a> {
    pub fn sender(&self) -> &Jid {
        &self.message.chat
    }

    /// Arguments joined by a single space, `None` when there are none
    pub fn joined_args(&self) -> Option<String> {
        if self.args.is_empty() {
            None
        } else {
            Some(self.args.join(" "))
        }
    }
}

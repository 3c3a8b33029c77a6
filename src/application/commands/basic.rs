use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::application::messaging::Context;
use crate::domain::entities::{CommandHandler, Reply};
use crate::domain::traits::{pick, Chooser};
use super::PONG;

/// Random reply from the greeting pool
pub fn greeting_reply(replies: &[String], chooser: &dyn Chooser) -> Option<Reply> {
    pick(chooser, replies).map(|text| Reply::text(text.clone()))
}

pub struct PingHandler;

#[async_trait]
impl CommandHandler for PingHandler {
    async fn handle(&self, _ctx: &Context<'_>) -> Result<Reply, CommandError> {
        Ok(Reply::text(PONG))
    }
}

pub struct GreetingHandler {
    replies: Vec<String>,
}

impl GreetingHandler {
    pub fn new(replies: Vec<String>) -> Self {
        Self { replies }
    }
}

#[async_trait]
impl CommandHandler for GreetingHandler {
    async fn handle(&self, ctx: &Context<'_>) -> Result<Reply, CommandError> {
        greeting_reply(&self.replies, ctx.chooser)
            .ok_or_else(|| CommandError::ExecutionFailed("greeting pool is empty".to_string()))
    }
}

pub struct InfoHandler;

#[async_trait]
impl CommandHandler for InfoHandler {
    async fn handle(&self, ctx: &Context<'_>) -> Result<Reply, CommandError> {
        let text = format!(
            "Ini adalah base bot WhatsApp.\n> Nama bot: {}\n> Nama owner: {}",
            ctx.bot.name, ctx.bot.owner
        );
        Ok(Reply::text(text).forwarded())
    }
}

/// Lists every registered command
pub struct MenuHandler;

#[async_trait]
impl CommandHandler for MenuHandler {
    async fn handle(&self, ctx: &Context<'_>) -> Result<Reply, CommandError> {
        let mut menu = format!("*{}* v{}\n\nDaftar command:\n", ctx.bot.name, ctx.bot.version);
        for cmd in ctx.commands.all() {
            let usage = cmd
                .usage
                .clone()
                .unwrap_or_else(|| format!("{}{}", ctx.bot.prefix, cmd.name));
            menu.push_str(&format!(
                "• {} - {}\n",
                usage,
                cmd.description.as_deref().unwrap_or("")
            ));
        }
        Ok(Reply::text(menu.trim_end()).forwarded())
    }
}

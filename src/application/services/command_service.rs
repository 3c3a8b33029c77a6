use crate::application::commands::{
    GreetingHandler, InfoHandler, MenuHandler, PingHandler, StickerHandler, WeatherHandler,
    UNKNOWN_COMMAND,
};
use crate::application::errors::CommandError;
use crate::application::messaging::Context;
use crate::domain::entities::{Command, CommandRegistry, Reply};
use crate::infrastructure::config::Config;
use crate::infrastructure::weather::WeatherClient;

/// Service for managing and executing commands
pub struct CommandService {
    registry: CommandRegistry,
    prefix: String,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            prefix: prefix.into(),
        }
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    pub fn register_defaults(&mut self, config: &Config) {
        let p = self.prefix.clone();

        self.register(Command::new("ping")
            .with_description("Cek bot aktif")
            .with_handler(PingHandler));

        self.register(Command::new("halo")
            .with_description("Sapa bot")
            .with_handler(GreetingHandler::new(config.greetings.replies.clone())));

        self.register(Command::new("info")
            .with_description("Info bot dan owner")
            .with_handler(InfoHandler));

        self.register(Command::new("menu")
            .with_description("Tampilkan daftar command")
            .with_aliases(&["help"])
            .with_handler(MenuHandler));

        self.register(Command::new("cuaca")
            .with_description("Cek suhu terkini")
            .with_aliases(&["weather"])
            .with_usage(format!("{}cuaca [lokasi]", p))
            .with_handler(WeatherHandler::new(
                WeatherClient::new(&config.weather),
                config.weather.default_location.clone(),
            )));

        self.register(Command::new("sticker")
            .with_description("Ubah gambar jadi stiker")
            .with_aliases(&["stiker", "s"])
            .with_handler(StickerHandler));
    }

    /// Run the handler for `ctx.command`, unknown names get the fixed fallback reply
    pub async fn handle(&self, ctx: &Context<'_>) -> Result<Reply, CommandError> {
        let Some(cmd) = self.registry.find(ctx.command) else {
            tracing::debug!("Unknown command: {}", ctx.command);
            return Ok(Reply::text(UNKNOWN_COMMAND));
        };

        match &cmd.handler {
            Some(handler) => handler.handle(ctx).await,
            None => Ok(Reply::text(UNKNOWN_COMMAND)),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }
}

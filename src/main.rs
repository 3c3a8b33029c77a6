use clap::{Parser, Subcommand};

mod domain;
mod application;
mod infrastructure;

use application::errors::BotError;
use application::messaging::MessageDispatcher;
use application::services::{CommandService, MessageService, SessionOutcome, Supervisor};
use domain::traits::RandomChooser;
use infrastructure::adapters::console::ConsoleAdapter;
use infrastructure::config::Config;
use infrastructure::storage::FileCredentialStore;

#[derive(Parser)]
#[command(name = "wa-base-bot")]
#[command(about = "A small WhatsApp command bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            if let Err(e) = run_bot(&cli.config) {
                tracing::error!("Bot stopped: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("wa-base-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            if let Err(e) = init_config(&cli.config) {
                eprintln!("Failed to write config: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn load_config(config_path: &str) -> Config {
    if std::path::Path::new(config_path).exists() {
        Config::load(config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    }
}

fn run_bot(config_path: &str) -> Result<(), BotError> {
    let config = load_config(config_path);
    tracing::info!("Starting {} v{} (owner: {})", config.bot.name, config.bot.version, config.bot.owner);

    let mut commands = CommandService::new(&config.bot.prefix);
    commands.register_defaults(&config);
    tracing::info!("Registered {} commands", commands.registry().len());

    let dispatcher = MessageDispatcher::new(
        config.bot.clone(),
        config.greetings.clone(),
        commands,
        Box::new(RandomChooser),
    );
    let messages = MessageService::new(dispatcher, config.session.ignore_broadcast);
    let store = FileCredentialStore::new(config.session.auth_dir.clone());
    let adapter = ConsoleAdapter::new();
    let mut input = adapter.input();
    let supervisor = Supervisor::new(adapter, store, messages, config.pairing.clone());

    // Events are handled one batch at a time
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        match supervisor.run(&mut input).await? {
            SessionOutcome::LoggedOut => {
                tracing::warn!(
                    "Logged out. Delete {} and restart to pair again",
                    config.session.auth_dir.display()
                );
            }
            outcome => tracing::info!("Session finished: {:?}", outcome),
        }
        Ok::<(), BotError>(())
    })
}

fn init_config(path: &str) -> Result<(), BotError> {
    if std::path::Path::new(path).exists() {
        println!("{} already exists, not overwriting", path);
        return Ok(());
    }
    let yaml = Config::default().to_yaml()?;
    std::fs::write(path, yaml)?;
    println!("Created {}", path);
    Ok(())
}

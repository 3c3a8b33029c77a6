//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub pairing: PairingConfig,
    pub session: SessionConfig,
    pub greetings: GreetingConfig,
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    pub owner: String,
    pub version: String,
    pub prefix: String,
}

/// First-run device linking
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PairingConfig {
    /// Skip the interactive prompt when set
    pub phone_number: Option<String>,
    /// Custom 8-character pairing code
    pub custom_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SessionConfig {
    /// Directory holding the persisted credential set
    pub auth_dir: PathBuf,
    pub ignore_broadcast: bool,
}

/// Free-text greeting auto-reply
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GreetingConfig {
    pub keywords: Vec<String>,
    pub replies: Vec<String>,
}

/// Forecast lookup. Coordinates are fixed; the `/cuaca` argument is only a label.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct WeatherConfig {
    pub endpoint: String,
    pub latitude: f64,
    pub longitude: f64,
    pub default_location: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "wa-base-bot".to_string(),
            owner: "owner".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            prefix: "/".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auth_dir: PathBuf::from("auth_info"),
            ignore_broadcast: true,
        }
    }
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            keywords: vec!["hai".to_string(), "halo".to_string(), "hello".to_string()],
            replies: vec![
                "Hai! 👋".to_string(),
                "Halo juga! 😎".to_string(),
                "Hai, ada yang bisa dibantu? 😊".to_string(),
                "Yo! Ketik /menu buat lihat command. 🙌".to_string(),
            ],
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.open-meteo.com/v1/forecast".to_string(),
            latitude: -6.2,
            longitude: 106.8,
            default_location: "Jakarta".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::InvalidValue("bot.prefix must not be empty".to_string()));
        }
        if self.greetings.replies.is_empty() {
            return Err(ConfigError::InvalidValue("greetings.replies must not be empty".to_string()));
        }
        if let Some(code) = &self.pairing.custom_code {
            if code.chars().count() != 8 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::InvalidValue(
                    "pairing.custom-code must be 8 alphanumeric characters".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();

        if let Ok(name) = std::env::var("BOT_NAME") {
            config.bot.name = name;
        }

        if let Ok(owner) = std::env::var("BOT_OWNER") {
            config.bot.owner = owner;
        }

        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            if !prefix.is_empty() {
                config.bot.prefix = prefix;
            }
        }

        if let Ok(phone) = std::env::var("PAIRING_NUMBER") {
            config.pairing.phone_number = Some(phone);
        }

        config
    }
}

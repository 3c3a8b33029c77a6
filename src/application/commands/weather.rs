use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::application::messaging::Context;
use crate::domain::entities::{CommandHandler, Reply};
use crate::infrastructure::weather::WeatherClient;
use super::WEATHER_FAILED;

/// `/cuaca [lokasi]`
///
/// The location only labels the reply. The forecast always comes from the
/// configured coordinates; there is no geocoding step.
pub struct WeatherHandler {
    client: WeatherClient,
    default_location: String,
}

impl WeatherHandler {
    pub fn new(client: WeatherClient, default_location: impl Into<String>) -> Self {
        Self {
            client,
            default_location: default_location.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for WeatherHandler {
    async fn handle(&self, ctx: &Context<'_>) -> Result<Reply, CommandError> {
        let location = ctx
            .joined_args()
            .unwrap_or_else(|| self.default_location.clone());
        let (lat, lon) = self.client.coordinates();
        tracing::debug!("Weather for '{}' fetched at fixed coordinates {}, {}", location, lat, lon);

        match self.client.current_temperature().await {
            Ok(temperature) => Ok(Reply::text(format!(
                "🌤️ Cuaca di {}: {}°C",
                location, temperature
            ))),
            Err(e) => {
                tracing::warn!("Weather lookup failed: {}", e);
                Ok(Reply::text(WEATHER_FAILED))
            }
        }
    }
}

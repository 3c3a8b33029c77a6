//! Forecast client for the Open-Meteo API

use reqwest::Client;
use serde::Deserialize;

use crate::application::errors::BotError;
use crate::infrastructure::config::WeatherConfig;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Hourly,
}

#[derive(Debug, Deserialize)]
struct Hourly {
    temperature_2m: Vec<Option<f64>>,
}

/// Fetches the forecast for one fixed coordinate pair
pub struct WeatherClient {
    client: Client,
    endpoint: String,
    latitude: f64,
    longitude: f64,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            latitude: config.latitude,
            longitude: config.longitude,
        }
    }

    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// First hourly temperature in °C
    pub async fn current_temperature(&self) -> Result<f64, BotError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("hourly", "temperature_2m".to_string()),
            ])
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "Forecast API error: {}",
                response.status()
            )));
        }

        let data: ForecastResponse = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        data.hourly
            .temperature_2m
            .first()
            .copied()
            .flatten()
            .ok_or_else(|| BotError::Parse("forecast has no hourly temperature".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WeatherClient {
        WeatherClient::new(&WeatherConfig {
            endpoint: format!("{}/v1/forecast", server.uri()),
            latitude: -6.2,
            longitude: 106.8,
            default_location: "Jakarta".to_string(),
        })
    }

    #[tokio::test]
    async fn test_reads_first_hourly_temperature() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "-6.2"))
            .and(query_param("longitude", "106.8"))
            .and(query_param("hourly", "temperature_2m"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "latitude": -6.2,
                "longitude": 106.8,
                "hourly": {
                    "time": ["2026-10-18T00:00", "2026-10-18T01:00"],
                    "temperature_2m": [27.4, 26.9]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let temperature = client_for(&server).current_temperature().await.unwrap();
        assert_eq!(temperature, 27.4);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).current_temperature().await.unwrap_err();
        assert!(matches!(err, BotError::Network(_)));
    }

    #[tokio::test]
    async fn test_empty_or_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hourly": { "temperature_2m": [] }
            })))
            .mount(&server)
            .await;
        assert!(matches!(
            client_for(&server).current_temperature().await,
            Err(BotError::Parse(_))
        ));

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;
        assert!(matches!(
            client_for(&server).current_temperature().await,
            Err(BotError::Parse(_))
        ));
    }
}

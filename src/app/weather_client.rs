use crate::app::http::send_once;
use crate::domain::model::{Coordinates, WeatherSummary};
use crate::domain::ports::{ConfigProvider, WeatherProvider};
use crate::utils::error::{MujiError, Result};
use crate::utils::validation::{validate_credential, validate_range, validate_url};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const WEATHER_SERVICE: &str = "weather";

/// `weather` 陣列為空時使用的描述
pub const UNKNOWN_WEATHER: &str = "날씨 정보 없음";

/// OpenWeather One Call 客戶端
#[derive(Clone)]
pub struct HttpWeatherClient {
    endpoint: String,
    api_key: String,
    language: String,
    timeout: Option<Duration>,
    client: Client,
}

impl std::fmt::Debug for HttpWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpWeatherClient")
            .field("endpoint", &self.endpoint)
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpWeatherClient {
    pub fn new(
        endpoint: &str,
        api_key: &str,
        language: &str,
        timeout_seconds: Option<u64>,
    ) -> Result<Self> {
        validate_url("weather.endpoint", endpoint)?;
        validate_credential("weather.api_key", api_key)?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            api_key: api_key.trim().to_string(),
            language: language.to_string(),
            timeout: timeout_seconds.map(Duration::from_secs),
            client: Client::new(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.weather_endpoint(),
            config.weather_api_key(),
            config.weather_language(),
            config.weather_timeout_seconds(),
        )
    }
}

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    feels_like: f64,
    #[serde(default)]
    weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: String,
}

pub(crate) fn decode_weather(body: &str) -> Result<WeatherSummary> {
    let response: OneCallResponse = serde_json::from_str(body)
        .map_err(|e| MujiError::decoding(WEATHER_SERVICE, e.to_string()))?;

    let current = response.current;
    let description = current
        .weather
        .into_iter()
        .next()
        .map(|condition| condition.description)
        .unwrap_or_else(|| {
            tracing::warn!("Weather response has no conditions, using placeholder description");
            UNKNOWN_WEATHER.to_string()
        });

    Ok(WeatherSummary::from_kelvin(description, current.feels_like))
}

#[async_trait]
impl WeatherProvider for HttpWeatherClient {
    async fn fetch_weather(&self, coordinates: Coordinates) -> Result<WeatherSummary> {
        validate_range("latitude", coordinates.latitude, -90.0, 90.0)
            .and_then(|_| validate_range("longitude", coordinates.longitude, -180.0, 180.0))
            .map_err(|e| MujiError::ValidationError {
                message: e.to_string(),
            })?;

        tracing::debug!(
            "Making weather request to: {} (lat={}, lon={})",
            self.endpoint,
            coordinates.latitude,
            coordinates.longitude
        );

        let request = self.client.get(&self.endpoint).query(&[
            ("lat", coordinates.latitude.to_string()),
            ("lon", coordinates.longitude.to_string()),
            ("lang", self.language.clone()),
            ("appid", self.api_key.clone()),
        ]);

        let body = send_once(WEATHER_SERVICE, request, self.timeout).await?;
        decode_weather(&body)
    }
}

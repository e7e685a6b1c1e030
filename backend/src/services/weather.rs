//! Weather service for current conditions and forecasts

use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use shared::{ChangeEvent, WeatherReport};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};
use crate::external::{DemoWeatherSource, WeatherClient};
use crate::services::realtime::{weather_topic, ChannelRegistry, LiveEvent};

/// Longest forecast the service will produce, in days
pub const MAX_FORECAST_DAYS: u32 = 16;

/// Weather service fetching from the API, or from the demo source when
/// no API key is configured
#[derive(Clone)]
pub struct WeatherService {
    weather_client: Option<WeatherClient>,
    demo: DemoWeatherSource,
    realtime: ChannelRegistry,
    forecast_days: u32,
}

impl WeatherService {
    /// Create a new WeatherService instance
    pub fn new(config: &WeatherConfig, realtime: ChannelRegistry) -> Self {
        let weather_client = config
            .api_key
            .as_ref()
            .filter(|key| !key.trim().is_empty())
            .map(|key| WeatherClient::with_base_url(key.clone(), config.api_endpoint.clone()));

        if weather_client.is_none() {
            tracing::warn!("No weather API key configured, serving demo weather data");
        }

        Self {
            weather_client,
            demo: DemoWeatherSource::new(),
            realtime,
            forecast_days: config.forecast_days,
        }
    }

    /// Create a WeatherService with a specific client (for testing)
    pub fn with_client(
        weather_client: Option<WeatherClient>,
        forecast_days: u32,
        realtime: ChannelRegistry,
    ) -> Self {
        Self {
            weather_client,
            demo: DemoWeatherSource::new(),
            realtime,
            forecast_days,
        }
    }

    pub fn is_live(&self) -> bool {
        self.weather_client.is_some()
    }

    /// Current conditions for a location, published on its weather feed
    pub async fn get_current(&self, location: &str) -> AppResult<WeatherReport> {
        let location = validate_location(location)?;

        let report = match &self.weather_client {
            Some(client) => client.get_current_weather(location).await?,
            None => {
                let mut rng = StdRng::from_entropy();
                self.demo.current(&mut rng, location, Utc::now())
            }
        };

        let delivered = self.realtime.publish(
            &weather_topic(location),
            LiveEvent::Weather(ChangeEvent::Insert(report.clone())),
        );
        tracing::debug!("Published weather for {} to {} subscribers", location, delivered);

        Ok(report)
    }

    /// Daily forecast for a location
    pub async fn get_forecast(&self, location: &str, days: Option<u32>) -> AppResult<Vec<WeatherReport>> {
        let location = validate_location(location)?;
        let days = days.unwrap_or(self.forecast_days);
        if days == 0 || days > MAX_FORECAST_DAYS {
            return Err(AppError::Validation {
                field: "days".to_string(),
                message: format!("Forecast days must be between 1 and {}", MAX_FORECAST_DAYS),
            });
        }

        match &self.weather_client {
            Some(client) => client.get_forecast(location, days as usize).await,
            None => {
                let mut rng = StdRng::from_entropy();
                Ok(self.demo.forecast(&mut rng, location, days as usize, Utc::now()))
            }
        }
    }
}

fn validate_location(location: &str) -> AppResult<&str> {
    let location = location.trim();
    if location.is_empty() {
        return Err(AppError::Validation {
            field: "location".to_string(),
            message: "Location must not be empty".to_string(),
        });
    }
    Ok(location)
}

//! Weather API client for fetching weather data
//!
//! Integrates with an OpenWeatherMap-compatible API for current conditions
//! and forecasts looked up by location name

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use shared::WeatherReport;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Rainfall at or above this total raises a heavy rain alert (mm)
pub const HEAVY_RAINFALL_MM: f64 = 10.0;
/// Temperature at or below this raises a frost alert (°C)
pub const FROST_TEMPERATURE_C: f64 = 2.0;
pub const DROUGHT_RAINFALL_MM: f64 = 1.0;
pub const DROUGHT_HUMIDITY_PERCENT: f64 = 40.0;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    weather: Vec<OWMWeather>,
    main: OWMMain,
    wind: OWMWind,
    rain: Option<OWMRain>,
    dt: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    city: OWMCity,
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    weather: Vec<OWMWeather>,
    wind: OWMWind,
    rain: Option<OWMRain>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch current weather conditions for a named location
    pub async fn get_current_weather(&self, location: &str) -> AppResult<WeatherReport> {
        let data: OWMCurrentResponse = self.fetch("weather", location).await?;
        Ok(convert_current_response(data, location))
    }

    /// Fetch the forecast for a named location, one report per day
    pub async fn get_forecast(&self, location: &str, days: usize) -> AppResult<Vec<WeatherReport>> {
        let data: OWMForecastResponse = self.fetch("forecast", location).await?;
        let mut reports = convert_forecast_response(data, location);
        reports.truncate(days);
        Ok(reports)
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, path: &str, location: &str) -> AppResult<T> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(&[("q", location), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Weather API request failed: {}", e);
                AppError::WeatherServiceUnavailable
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to parse weather response: {}", e)))
    }
}

/// Alerts raised by a report's readings
pub fn derive_alerts(temperature: f64, rainfall: f64, humidity: f64) -> Vec<String> {
    let mut alerts = Vec::new();
    if rainfall >= HEAVY_RAINFALL_MM {
        alerts.push("Heavy rainfall expected in next 48 hours".to_string());
    }
    if temperature <= FROST_TEMPERATURE_C {
        alerts.push("Frost warning".to_string());
    }
    if rainfall < DROUGHT_RAINFALL_MM && humidity < DROUGHT_HUMIDITY_PERCENT {
        alerts.push("Drought conditions".to_string());
    }
    alerts
}

fn rain_total(rain: Option<&OWMRain>) -> f64 {
    rain.and_then(|r| r.one_hour.or(r.three_hour)).unwrap_or(0.0)
}

fn timestamp(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or_else(Utc::now)
}

fn location_name(reported: String, requested: &str) -> String {
    if reported.trim().is_empty() {
        requested.to_string()
    } else {
        reported
    }
}

/// Convert OpenWeatherMap current response to a report
fn convert_current_response(data: OWMCurrentResponse, requested: &str) -> WeatherReport {
    let rainfall = rain_total(data.rain.as_ref());

    WeatherReport {
        id: Uuid::new_v4(),
        location: location_name(data.name, requested),
        temperature: data.main.temp,
        humidity: data.main.humidity,
        rainfall,
        wind_speed: data.wind.speed,
        forecast_date: timestamp(data.dt),
        description: data
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_default(),
        alerts: derive_alerts(data.main.temp, rainfall, data.main.humidity),
    }
}

#[derive(Default)]
struct DailyAccumulator {
    samples: usize,
    temperature: f64,
    humidity: f64,
    wind_speed: f64,
    rainfall: f64,
    description: Option<String>,
}

/// Collapse 3-hourly forecast entries into one report per UTC day
fn convert_forecast_response(data: OWMForecastResponse, requested: &str) -> Vec<WeatherReport> {
    let location = location_name(data.city.name, requested);
    let mut days: BTreeMap<NaiveDate, DailyAccumulator> = BTreeMap::new();

    for item in data.list {
        let day = timestamp(item.dt).date_naive();
        let acc = days.entry(day).or_default();
        acc.samples += 1;
        acc.temperature += item.main.temp;
        acc.humidity += item.main.humidity;
        acc.wind_speed += item.wind.speed;
        acc.rainfall += rain_total(item.rain.as_ref());
        if acc.description.is_none() {
            acc.description = item.weather.first().map(|w| w.description.clone());
        }
    }

    days.into_iter()
        .map(|(day, acc)| {
            let n = acc.samples as f64;
            let temperature = acc.temperature / n;
            let humidity = acc.humidity / n;
            let date = day
                .and_hms_opt(12, 0, 0)
                .map(|dt| Utc.from_utc_datetime(&dt))
                .unwrap_or_else(Utc::now);

            WeatherReport {
                id: Uuid::new_v4(),
                location: location.clone(),
                temperature,
                humidity,
                rainfall: acc.rainfall,
                wind_speed: acc.wind_speed / n,
                forecast_date: date,
                description: acc.description.unwrap_or_default(),
                alerts: derive_alerts(temperature, acc.rainfall, humidity),
            }
        })
        .collect()
}

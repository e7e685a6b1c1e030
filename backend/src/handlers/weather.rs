//! HTTP handlers for weather endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{WeatherObservation, WeatherReport};

use crate::error::AppResult;
use crate::AppState;

/// Query parameters naming a location
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub location: String,
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct IrrigationQuery {
    pub crop_type: String,
    pub location: String,
}

/// Irrigation advice computed from a location's current weather
#[derive(Debug, Serialize)]
pub struct IrrigationReport {
    pub crop_type: String,
    pub weather: WeatherReport,
    pub advice: Vec<String>,
}

/// Get current weather for a location
pub async fn get_current_weather(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<WeatherReport>> {
    let report = state.weather.get_current(&query.location).await?;
    Ok(Json(report))
}

/// Get the daily forecast for a location
pub async fn get_weather_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<Vec<WeatherReport>>> {
    let forecast = state.weather.get_forecast(&query.location, query.days).await?;
    Ok(Json(forecast))
}

/// Fetch current weather and advise on irrigation for it
pub async fn get_weather_irrigation(
    State(state): State<AppState>,
    Query(query): Query<IrrigationQuery>,
) -> AppResult<Json<IrrigationReport>> {
    let weather = state.weather.get_current(&query.location).await?;
    let advice = state
        .advisor
        .irrigation_advice(&query.crop_type, &WeatherObservation::from(&weather))?;

    Ok(Json(IrrigationReport {
        crop_type: query.crop_type,
        weather,
        advice,
    }))
}

//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub crops: usize,
    pub channels: usize,
    pub weather_source: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let weather_source = if state.weather.is_live() { "api" } else { "demo" };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        crops: state.advisor.knowledge_base().len(),
        channels: state.realtime.len(),
        weather_source: weather_source.to_string(),
    })
}

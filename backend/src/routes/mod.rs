//! Route definitions for the Farm Advisor API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/crops", crop_routes())
        .nest("/weather", weather_routes())
        // Live feed publishing
        .route("/alerts", post(handlers::create_alert))
        .route("/field-reports", post(handlers::submit_field_report))
        .route("/channels", get(handlers::list_channels))
        .route("/channels/:topic/next", get(handlers::next_channel_event))
}

/// Crop advisory routes
fn crop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_crops))
        .route("/recommendations", post(handlers::generate_recommendations))
        .route("/:crop_type/profile", get(handlers::get_crop_profile))
        .route("/:crop_type/plan", get(handlers::get_crop_plan))
        .route("/:crop_type/irrigation", post(handlers::get_irrigation_advice))
}

/// Weather routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/current", get(handlers::get_current_weather))
        .route("/forecast", get(handlers::get_weather_forecast))
        .route("/irrigation", get(handlers::get_weather_irrigation))
}

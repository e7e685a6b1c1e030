//! HTTP handlers for crop recommendations, plans and irrigation advice

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use shared::{
    CropPlan, CropProfile, CropRecommendation, CropSummary, RecommendationRequest,
    WeatherObservation,
};

use crate::error::AppResult;
use crate::AppState;

/// Irrigation advice for one crop
#[derive(Debug, Serialize)]
pub struct IrrigationAdviceResponse {
    pub crop_type: String,
    pub advice: Vec<String>,
}

/// Generate crop recommendations for a farm
pub async fn generate_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<CropRecommendation>>> {
    let recommendations = state.advisor.generate_recommendations(request).await?;
    Ok(Json(recommendations))
}

/// List known crops with their profiles
pub async fn list_crops(State(state): State<AppState>) -> Json<Vec<CropSummary>> {
    Json(state.advisor.list_crops())
}

pub async fn get_crop_profile(
    State(state): State<AppState>,
    Path(crop_type): Path<String>,
) -> AppResult<Json<CropProfile>> {
    let profile = state.advisor.get_profile(&crop_type)?;
    Ok(Json(profile))
}

/// Get the detailed cultivation plan for a crop
pub async fn get_crop_plan(
    State(state): State<AppState>,
    Path(crop_type): Path<String>,
) -> Json<CropPlan> {
    Json(state.advisor.get_detailed_plan(&crop_type).await)
}

/// Irrigation advice for caller-supplied weather
pub async fn get_irrigation_advice(
    State(state): State<AppState>,
    Path(crop_type): Path<String>,
    Json(weather): Json<WeatherObservation>,
) -> AppResult<Json<IrrigationAdviceResponse>> {
    let advice = state.advisor.irrigation_advice(&crop_type, &weather)?;
    Ok(Json(IrrigationAdviceResponse { crop_type, advice }))
}

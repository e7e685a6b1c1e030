//! Detailed cultivation plan models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Full cultivation plan for one crop type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropPlan {
    pub overview: String,
    pub growth_stages: Vec<GrowthStage>,
    pub irrigation_details: Vec<IrrigationDetail>,
    pub fertilizer_schedule: Vec<FertilizerApplication>,
    pub pest_management: Vec<PestControl>,
    pub harvest_guidelines: Vec<HarvestGuideline>,
    pub market_insight: MarketInsight,
}

impl CropPlan {
    /// Sum of all growth stage durations
    pub fn total_stage_days(&self) -> u32 {
        self.growth_stages.iter().map(|s| s.duration_days).sum()
    }
}

/// A named, time-bounded phase of crop development
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GrowthStage {
    pub stage: String,
    pub duration_days: u32,
    pub description: String,
    pub key_activities: Vec<String>,
    pub warning_signs: Vec<String>,
}

/// Watering guidance for a growth stage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IrrigationDetail {
    pub growth_stage: String,
    pub frequency: String,
    pub amount_per_session: String,
    pub timing: String,
    pub weather_adjustments: String,
}

/// One fertilizer application in the schedule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FertilizerApplication {
    /// Weeks after planting
    pub week: u32,
    pub fertilizer_type: String,
    pub amount: String,
    pub application_method: String,
    pub notes: String,
}

/// Identification and treatment of a common pest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PestControl {
    pub pest_type: String,
    pub identification: String,
    pub prevention: Vec<String>,
    pub organic_treatment: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chemical_treatment: Option<Vec<String>>,
}

/// A sign that the crop is ready to harvest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarvestGuideline {
    pub indicator: String,
    pub description: String,
    pub timing: String,
}

/// Direction of recent market prices
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Up,
    Down,
    Stable,
}

/// Market outlook for the harvested crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketInsight {
    /// Price per kilogram
    pub current_price: Decimal,
    pub price_trend: PriceTrend,
    pub best_selling_time: String,
    pub storage_tips: Vec<String>,
    pub quality_factors: Vec<String>,
}

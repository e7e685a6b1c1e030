//! Crop recommendation models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Identified;

/// Grower context submitted when asking for recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Opaque user identifier; may be a placeholder for demo use
    pub user_id: String,
    pub location: String,
    /// Accepted but not yet used for scoring
    pub soil_type: String,
    /// Farm area in acres
    pub farm_size: f64,
}

impl RecommendationRequest {
    pub fn new(
        user_id: impl Into<String>,
        location: impl Into<String>,
        soil_type: impl Into<String>,
        farm_size: f64,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            location: location.into(),
            soil_type: soil_type.into(),
            farm_size,
        }
    }
}

/// A suggested crop with planting window and yield estimate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropRecommendation {
    pub id: Uuid,
    pub user_id: String,
    pub crop_type: String,
    pub planting_date: DateTime<Utc>,
    pub harvest_date: DateTime<Utc>,
    pub irrigation_schedule: Vec<String>,
    pub fertilizer_recommendations: Vec<String>,
    /// Kilograms for the whole farm
    pub expected_yield: f64,
    /// Percentage in [85, 95)
    pub confidence_score: f64,
    pub created_at: DateTime<Utc>,
}

impl CropRecommendation {
    /// Days between planting and harvest
    pub fn season_days(&self) -> i64 {
        (self.harvest_date - self.planting_date).num_days()
    }
}

impl Identified for CropRecommendation {
    fn entity_id(&self) -> Uuid {
        self.id
    }
}

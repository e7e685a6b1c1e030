//! Field report models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Identified;

/// A grower's observation of a field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldReport {
    pub id: Uuid,
    pub user_id: String,
    pub crop_status: String,
    pub weather_conditions: String,
    /// Soil moisture percentage
    pub soil_moisture: f64,
    pub pest_issues: Vec<String>,
    pub growth_stage: String,
    /// Photo URLs
    pub photos: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for submitting a field report
#[derive(Debug, Clone, Deserialize)]
pub struct NewFieldReport {
    pub user_id: String,
    pub crop_status: String,
    pub weather_conditions: String,
    pub soil_moisture: f64,
    #[serde(default)]
    pub pest_issues: Vec<String>,
    pub growth_stage: String,
    #[serde(default)]
    pub photos: Vec<String>,
}

impl NewFieldReport {
    pub fn into_report(self, now: DateTime<Utc>) -> FieldReport {
        FieldReport {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            crop_status: self.crop_status,
            weather_conditions: self.weather_conditions,
            soil_moisture: self.soil_moisture,
            pest_issues: self.pest_issues,
            growth_stage: self.growth_stage,
            photos: self.photos,
            created_at: now,
        }
    }
}

impl Identified for FieldReport {
    fn entity_id(&self) -> Uuid {
        self.id
    }
}

//! Crop reference profiles

use serde::{Deserialize, Serialize};

use crate::types::ValueRange;

/// Water demand class of a crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WaterRequirement {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl std::fmt::Display for WaterRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaterRequirement::Low => write!(f, "Low"),
            WaterRequirement::Medium => write!(f, "Medium"),
            WaterRequirement::High => write!(f, "High"),
            WaterRequirement::VeryHigh => write!(f, "Very High"),
        }
    }
}

/// Static growing characteristics of a crop type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropProfile {
    pub growing_season_days: u32,
    pub water_requirement: WaterRequirement,
    /// Preferred soil, e.g. `loamy`, `clay`, `sandy_loam`
    pub soil_type: String,
    /// Degrees Celsius
    pub temperature_range: ValueRange,
    /// Millimetres over the season
    pub rainfall_range_mm: ValueRange,
}

impl CropProfile {
    /// Check the profile invariants: a positive season and ordered ranges
    pub fn is_valid(&self) -> bool {
        self.growing_season_days > 0
            && self.temperature_range.is_ordered()
            && self.rainfall_range_mm.is_ordered()
    }
}

/// A crop type together with its profile, as listed to the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct CropSummary {
    pub crop_type: String,
    pub profile: CropProfile,
}

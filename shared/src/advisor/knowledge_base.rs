//! Crop knowledge base

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use crate::error::{AdvisorError, AdvisorResult};
use crate::models::{CropPlan, CropProfile};
use crate::validation::validate_crop_type;

use super::catalog;

/// Crop whose plan is served when a requested crop has none
pub const DEFAULT_PLAN_CROP: &str = "corn";

/// Whether a plan lookup hit the requested crop or fell back to the default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    Found,
    Defaulted,
}

/// Immutable mapping from crop type to profile and cultivation plan
///
/// Profiles keep their insertion order, which is the natural enumeration
/// order used when selecting recommendation candidates.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    profiles: Vec<(String, CropProfile)>,
    plans: HashMap<String, CropPlan>,
    default_plan_crop: String,
}

static GLOBAL: OnceLock<Arc<KnowledgeBase>> = OnceLock::new();

impl KnowledgeBase {
    /// Build a knowledge base, checking every entry
    pub fn new(
        profiles: Vec<(String, CropProfile)>,
        plans: Vec<(String, CropPlan)>,
        default_plan_crop: &str,
    ) -> AdvisorResult<Self> {
        let mut seen = HashSet::new();
        for (crop_type, profile) in &profiles {
            validate_crop_type(crop_type).map_err(|e| AdvisorError::invalid("crop_type", e))?;
            if !profile.is_valid() {
                return Err(AdvisorError::invalid(
                    "profile",
                    format!("profile for {} has an empty season or reversed range", crop_type),
                ));
            }
            if !seen.insert(crop_type.as_str()) {
                return Err(AdvisorError::invalid(
                    "crop_type",
                    format!("duplicate profile for {}", crop_type),
                ));
            }
        }

        let plans: HashMap<String, CropPlan> = plans.into_iter().collect();
        if !plans.contains_key(default_plan_crop) {
            return Err(AdvisorError::UnknownCrop(default_plan_crop.to_string()));
        }

        Ok(Self {
            profiles,
            plans,
            default_plan_crop: default_plan_crop.to_string(),
        })
    }

    /// The reference crop data: corn, rice, wheat and tomatoes
    pub fn builtin() -> Self {
        Self {
            profiles: catalog::profiles(),
            plans: catalog::plans().into_iter().collect(),
            default_plan_crop: DEFAULT_PLAN_CROP.to_string(),
        }
    }

    /// Process-wide instance, built on first use and never mutated
    pub fn global() -> &'static KnowledgeBase {
        GLOBAL.get_or_init(|| Arc::new(Self::builtin())).as_ref()
    }

    /// Shared handle to the process-wide instance
    pub fn shared() -> Arc<KnowledgeBase> {
        GLOBAL.get_or_init(|| Arc::new(Self::builtin())).clone()
    }

    /// Crop types in enumeration order
    pub fn crop_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.profiles.iter().map(|(crop_type, _)| crop_type.as_str())
    }

    /// Profiles in enumeration order
    pub fn profiles(&self) -> impl Iterator<Item = (&str, &CropProfile)> + '_ {
        self.profiles
            .iter()
            .map(|(crop_type, profile)| (crop_type.as_str(), profile))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn contains(&self, crop_type: &str) -> bool {
        self.profiles.iter().any(|(known, _)| known == crop_type)
    }

    /// Profile for `crop_type`, or [`AdvisorError::UnknownCrop`]
    pub fn lookup_profile(&self, crop_type: &str) -> AdvisorResult<&CropProfile> {
        self.profiles
            .iter()
            .find(|(known, _)| known == crop_type)
            .map(|(_, profile)| profile)
            .ok_or_else(|| AdvisorError::UnknownCrop(crop_type.to_string()))
    }

    /// Plan for exactly `crop_type`, if one exists
    pub fn find_plan(&self, crop_type: &str) -> Option<&CropPlan> {
        self.plans.get(crop_type)
    }

    /// Plan for `crop_type`, falling back to the default crop's plan
    pub fn lookup_plan(&self, crop_type: &str) -> &CropPlan {
        self.find_plan(crop_type).unwrap_or_else(|| self.default_plan())
    }

    pub fn plan_source(&self, crop_type: &str) -> PlanSource {
        if self.plans.contains_key(crop_type) {
            PlanSource::Found
        } else {
            PlanSource::Defaulted
        }
    }

    pub fn default_plan_crop(&self) -> &str {
        &self.default_plan_crop
    }

    fn default_plan(&self) -> &CropPlan {
        // Presence is checked by `new` and guaranteed by the builtin catalog.
        &self.plans[&self.default_plan_crop]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WaterRequirement;
    use crate::types::ValueRange;

    fn profile(season: u32) -> CropProfile {
        CropProfile {
            growing_season_days: season,
            water_requirement: WaterRequirement::Medium,
            soil_type: "loamy".to_string(),
            temperature_range: ValueRange { min: 10.0, max: 20.0 },
            rainfall_range_mm: ValueRange { min: 100.0, max: 200.0 },
        }
    }

    #[test]
    fn test_builtin_enumeration_order() {
        let kb = KnowledgeBase::builtin();
        let crops: Vec<&str> = kb.crop_types().collect();
        assert_eq!(crops, vec!["corn", "rice", "wheat", "tomatoes"]);
    }

    #[test]
    fn test_builtin_profiles_are_valid() {
        let kb = KnowledgeBase::builtin();
        for (crop_type, profile) in kb.profiles() {
            assert!(profile.is_valid(), "{} profile invalid", crop_type);
        }
        assert_eq!(kb.lookup_profile("corn").unwrap().growing_season_days, 120);
        assert_eq!(kb.lookup_profile("rice").unwrap().growing_season_days, 150);
        assert_eq!(kb.lookup_profile("wheat").unwrap().growing_season_days, 100);
        assert_eq!(kb.lookup_profile("tomatoes").unwrap().growing_season_days, 90);
    }

    #[test]
    fn test_lookup_profile_unknown() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(
            kb.lookup_profile("quinoa"),
            Err(AdvisorError::UnknownCrop("quinoa".to_string()))
        );
    }

    #[test]
    fn test_plan_fallback_is_explicit() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.find_plan("quinoa").is_none());
        assert_eq!(kb.plan_source("quinoa"), PlanSource::Defaulted);
        assert_eq!(kb.plan_source("rice"), PlanSource::Found);
        assert_eq!(kb.lookup_plan("quinoa"), kb.lookup_plan("corn"));
    }

    #[test]
    fn test_every_profiled_crop_has_a_plan() {
        let kb = KnowledgeBase::builtin();
        for crop_type in kb.crop_types() {
            assert_eq!(kb.plan_source(crop_type), PlanSource::Found, "{}", crop_type);
        }
    }

    #[test]
    fn test_new_requires_default_plan() {
        let plan = KnowledgeBase::builtin().lookup_plan("corn").clone();
        let result = KnowledgeBase::new(
            vec![("millet".to_string(), profile(90))],
            vec![("millet".to_string(), plan)],
            "corn",
        );
        assert_eq!(result.err(), Some(AdvisorError::UnknownCrop("corn".to_string())));
    }

    #[test]
    fn test_new_rejects_bad_profiles() {
        let plan = KnowledgeBase::builtin().lookup_plan("corn").clone();
        let empty_season = KnowledgeBase::new(
            vec![("millet".to_string(), profile(0))],
            vec![("corn".to_string(), plan.clone())],
            "corn",
        );
        assert!(empty_season.is_err());

        let duplicate = KnowledgeBase::new(
            vec![
                ("millet".to_string(), profile(90)),
                ("millet".to_string(), profile(80)),
            ],
            vec![("corn".to_string(), plan.clone())],
            "corn",
        );
        assert!(duplicate.is_err());

        let bad_key = KnowledgeBase::new(
            vec![("Millet".to_string(), profile(90))],
            vec![("corn".to_string(), plan)],
            "corn",
        );
        assert!(bad_key.is_err());
    }

    #[test]
    fn test_global_is_shared() {
        let a = KnowledgeBase::global();
        let b = KnowledgeBase::shared();
        assert!(std::ptr::eq(a, b.as_ref()));
    }
}

//! Crop recommendation generation

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::error::AdvisorResult;
use crate::models::{CropRecommendation, RecommendationRequest};
use crate::validation::ensure_valid;

use super::knowledge_base::KnowledgeBase;

/// Number of candidates returned per request
pub const RECOMMENDATION_COUNT: usize = 3;

/// Planting starts within this many days of the request
pub const PLANTING_WINDOW_DAYS: i64 = 30;

/// Yield per unit area is drawn from `[BASE, BASE + SPREAD)`
pub const BASE_YIELD_PER_AREA: f64 = 800.0;
pub const YIELD_SPREAD: f64 = 400.0;

/// Confidence is drawn from `[BASE, BASE + SPREAD)`
pub const BASE_CONFIDENCE: f64 = 85.0;
pub const CONFIDENCE_SPREAD: f64 = 10.0;

const IRRIGATION_SCHEDULE: [&str; 3] = [
    "Water deeply every 3-4 days",
    "Reduce watering during flowering",
    "Increase watering during fruit development",
];

const FERTILIZER_RECOMMENDATIONS: [&str; 3] = [
    "Apply nitrogen-rich fertilizer during early growth",
    "Add phosphorus for root development",
    "Use potassium for disease resistance",
];

/// Upper clamp for samples so derived values stay inside their half-open ranges
const UNIT_CEILING: f64 = 0.999_999_999;

/// Chooses which crops to recommend for a grower
pub trait SuitabilityScorer: Send + Sync {
    /// Return at most `limit` crop types from `kb`, best first
    fn select<'kb>(
        &self,
        kb: &'kb KnowledgeBase,
        request: &RecommendationRequest,
        limit: usize,
    ) -> Vec<&'kb str>;
}

/// Takes the first crops in knowledge base order without scoring
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOrderScorer;

impl SuitabilityScorer for FixedOrderScorer {
    fn select<'kb>(
        &self,
        kb: &'kb KnowledgeBase,
        _request: &RecommendationRequest,
        limit: usize,
    ) -> Vec<&'kb str> {
        kb.crop_types().take(limit).collect()
    }
}

/// Source of uniform samples in `[0, 1)` for planting offsets and estimates
pub trait Jitter {
    fn sample(&mut self) -> f64;
}

/// [`Jitter`] backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RngJitter<R> {
    rng: R,
}

impl<R: Rng> RngJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngJitter<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Jitter for RngJitter<R> {
    fn sample(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Draw a sample and force it into `[0, 1)`
fn unit_sample<J: Jitter + ?Sized>(jitter: &mut J) -> f64 {
    let value = jitter.sample();
    if value.is_finite() {
        value.clamp(0.0, UNIT_CEILING)
    } else {
        0.0
    }
}

/// Expected yield for a farm given a unit jitter sample
pub fn expected_yield(farm_size: f64, sample: f64) -> f64 {
    farm_size * (BASE_YIELD_PER_AREA + sample * YIELD_SPREAD)
}

/// Produces ranked crop recommendations for a grower
#[derive(Clone)]
pub struct RecommendationGenerator {
    knowledge_base: Arc<KnowledgeBase>,
    scorer: Arc<dyn SuitabilityScorer>,
}

impl RecommendationGenerator {
    pub fn new(knowledge_base: Arc<KnowledgeBase>) -> Self {
        Self::with_scorer(knowledge_base, Arc::new(FixedOrderScorer))
    }

    pub fn with_scorer(
        knowledge_base: Arc<KnowledgeBase>,
        scorer: Arc<dyn SuitabilityScorer>,
    ) -> Self {
        Self {
            knowledge_base,
            scorer,
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    /// Generate up to [`RECOMMENDATION_COUNT`] recommendations
    ///
    /// `now` anchors the planting window and stamps `created_at`.
    pub fn generate<J: Jitter + ?Sized>(
        &self,
        request: &RecommendationRequest,
        jitter: &mut J,
        now: DateTime<Utc>,
    ) -> AdvisorResult<Vec<CropRecommendation>> {
        ensure_valid(request)?;

        let kb = self.knowledge_base.as_ref();
        let selected = self.scorer.select(kb, request, RECOMMENDATION_COUNT);

        let mut recommendations = Vec::with_capacity(selected.len());
        for crop_type in selected.into_iter().take(RECOMMENDATION_COUNT) {
            let profile = kb.lookup_profile(crop_type)?;

            let offset_days = ((unit_sample(jitter) * PLANTING_WINDOW_DAYS as f64).floor() as i64)
                .min(PLANTING_WINDOW_DAYS - 1);
            let planting_date = now + Duration::days(offset_days);
            let harvest_date =
                planting_date + Duration::days(i64::from(profile.growing_season_days));

            let yield_sample = unit_sample(jitter);
            let confidence_sample = unit_sample(jitter);

            recommendations.push(CropRecommendation {
                id: Uuid::new_v4(),
                user_id: request.user_id.clone(),
                crop_type: crop_type.to_string(),
                planting_date,
                harvest_date,
                irrigation_schedule: IRRIGATION_SCHEDULE.iter().map(|s| s.to_string()).collect(),
                fertilizer_recommendations: FERTILIZER_RECOMMENDATIONS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                expected_yield: expected_yield(request.farm_size, yield_sample),
                confidence_score: BASE_CONFIDENCE + confidence_sample * CONFIDENCE_SPREAD,
                created_at: now,
            });
        }

        Ok(recommendations)
    }
}

impl Default for RecommendationGenerator {
    fn default() -> Self {
        Self::new(KnowledgeBase::shared())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdvisorError;
    use crate::models::{CropProfile, WaterRequirement};
    use crate::types::ValueRange;

    struct Constant(f64);

    impl Jitter for Constant {
        fn sample(&mut self) -> f64 {
            self.0
        }
    }

    fn request(farm_size: f64) -> RecommendationRequest {
        RecommendationRequest::new("user-1", "Nakuru", "loamy", farm_size)
    }

    #[test]
    fn test_generates_first_three_crops_in_order() {
        let generator = RecommendationGenerator::default();
        let recs = generator
            .generate(&request(2.0), &mut RngJitter::seeded(1), Utc::now())
            .unwrap();
        let crops: Vec<&str> = recs.iter().map(|r| r.crop_type.as_str()).collect();
        assert_eq!(crops, vec!["corn", "rice", "wheat"]);
    }

    #[test]
    fn test_zero_jitter_gives_lower_bounds() {
        let now = Utc::now();
        let recs = RecommendationGenerator::default()
            .generate(&request(1.0), &mut Constant(0.0), now)
            .unwrap();
        for rec in &recs {
            assert_eq!(rec.planting_date, now);
            assert_eq!(rec.expected_yield, 800.0);
            assert_eq!(rec.confidence_score, 85.0);
        }
    }

    #[test]
    fn test_out_of_range_jitter_is_clamped() {
        let now = Utc::now();
        let generator = RecommendationGenerator::default();
        for value in [1.0, 7.5, f64::INFINITY] {
            let recs = generator.generate(&request(1.0), &mut Constant(value), now).unwrap();
            for rec in &recs {
                assert!(rec.confidence_score < 95.0);
                assert!(rec.expected_yield < 1200.0);
                assert!((rec.planting_date - now).num_days() <= 29);
            }
        }
        let recs = generator.generate(&request(1.0), &mut Constant(-3.0), now).unwrap();
        assert!(recs.iter().all(|r| r.confidence_score == 85.0));
    }

    #[test]
    fn test_invalid_farm_size_rejected() {
        let generator = RecommendationGenerator::default();
        let result = generator.generate(&request(0.0), &mut Constant(0.5), Utc::now());
        assert!(matches!(result, Err(AdvisorError::InvalidInput { .. })));
    }

    #[test]
    fn test_farm_size_overflowing_yield_rejected() {
        let generator = RecommendationGenerator::default();
        let result = generator.generate(&request(1e306), &mut RngJitter::seeded(3), Utc::now());
        match result {
            Err(AdvisorError::InvalidInput { field, .. }) => assert_eq!(field, "farm_size"),
            other => panic!("expected invalid farm size, got {:?}", other),
        }

        let recs = generator
            .generate(&request(1e300), &mut Constant(0.999), Utc::now())
            .unwrap();
        assert!(recs.iter().all(|r| r.expected_yield.is_finite()));
    }

    #[test]
    fn test_ids_unique_and_created_in_order() {
        let recs = RecommendationGenerator::default()
            .generate(&request(2.0), &mut Constant(0.5), Utc::now())
            .unwrap();
        let ids: std::collections::HashSet<Uuid> = recs.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), recs.len());
        assert!(recs.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[test]
    fn test_small_knowledge_base_returns_all_crops() {
        let plan = KnowledgeBase::builtin().lookup_plan("corn").clone();
        let profile = CropProfile {
            growing_season_days: 75,
            water_requirement: WaterRequirement::Low,
            soil_type: "sandy".to_string(),
            temperature_range: ValueRange { min: 20.0, max: 35.0 },
            rainfall_range_mm: ValueRange { min: 200.0, max: 400.0 },
        };
        let kb = KnowledgeBase::new(
            vec![
                ("millet".to_string(), profile.clone()),
                ("sorghum".to_string(), profile),
            ],
            vec![("corn".to_string(), plan)],
            "corn",
        )
        .unwrap();

        let generator = RecommendationGenerator::new(Arc::new(kb));
        let recs = generator
            .generate(&request(3.0), &mut Constant(0.25), Utc::now())
            .unwrap();
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| r.season_days() == 75));
    }

    #[test]
    fn test_custom_scorer_is_used() {
        struct Reverse;

        impl SuitabilityScorer for Reverse {
            fn select<'kb>(
                &self,
                kb: &'kb KnowledgeBase,
                _request: &RecommendationRequest,
                limit: usize,
            ) -> Vec<&'kb str> {
                let mut crops: Vec<&str> = kb.crop_types().collect();
                crops.reverse();
                crops.truncate(limit);
                crops
            }
        }

        let generator =
            RecommendationGenerator::with_scorer(KnowledgeBase::shared(), Arc::new(Reverse));
        let recs = generator
            .generate(&request(1.0), &mut Constant(0.5), Utc::now())
            .unwrap();
        assert_eq!(recs[0].crop_type, "tomatoes");
        assert_eq!(recs[0].season_days(), 90);
    }

    #[test]
    fn test_scorer_returning_unknown_crop_fails() {
        struct Bogus;

        impl SuitabilityScorer for Bogus {
            fn select<'kb>(
                &self,
                _kb: &'kb KnowledgeBase,
                _request: &RecommendationRequest,
                _limit: usize,
            ) -> Vec<&'kb str> {
                vec!["quinoa"]
            }
        }

        let generator =
            RecommendationGenerator::with_scorer(KnowledgeBase::shared(), Arc::new(Bogus));
        let result = generator.generate(&request(1.0), &mut Constant(0.5), Utc::now());
        assert_eq!(result, Err(AdvisorError::UnknownCrop("quinoa".to_string())));
    }
}

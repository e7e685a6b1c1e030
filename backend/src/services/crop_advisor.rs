//! Crop advisory service: recommendations, plans and irrigation advice

use std::time::Duration;

use chrono::Utc;
use shared::{
    irrigation_advice, ChangeEvent, CropPlan, CropProfile, CropRecommendation, CropSummary,
    KnowledgeBase, PlanSource, RecommendationGenerator, RecommendationRequest, RngJitter,
    WeatherObservation,
};

use crate::config::AdvisorConfig;
use crate::error::AppResult;
use crate::services::realtime::{crops_topic, ChannelRegistry, LiveEvent};

/// Service wrapping the advisory core for the HTTP layer
#[derive(Clone)]
pub struct CropAdvisorService {
    generator: RecommendationGenerator,
    realtime: ChannelRegistry,
    recommendation_latency: Duration,
    plan_latency: Duration,
}

impl CropAdvisorService {
    /// Create a new CropAdvisorService backed by the built-in knowledge base
    pub fn new(config: &AdvisorConfig, realtime: ChannelRegistry) -> Self {
        Self::with_generator(
            RecommendationGenerator::new(KnowledgeBase::shared()),
            config,
            realtime,
        )
    }

    pub fn with_generator(
        generator: RecommendationGenerator,
        config: &AdvisorConfig,
        realtime: ChannelRegistry,
    ) -> Self {
        Self {
            generator,
            realtime,
            recommendation_latency: Duration::from_millis(config.recommendation_latency_ms),
            plan_latency: Duration::from_millis(config.plan_latency_ms),
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        self.generator.knowledge_base()
    }

    /// Generate recommendations and publish each one on the user's crop feed
    pub async fn generate_recommendations(
        &self,
        request: RecommendationRequest,
    ) -> AppResult<Vec<CropRecommendation>> {
        simulate_latency(self.recommendation_latency).await;

        let mut jitter = RngJitter::from_entropy();
        let recommendations = self.generator.generate(&request, &mut jitter, Utc::now())?;

        let topic = crops_topic(&request.user_id);
        for recommendation in &recommendations {
            self.realtime.publish(
                &topic,
                LiveEvent::Crops(ChangeEvent::Insert(recommendation.clone())),
            );
        }

        tracing::info!(
            user_id = %request.user_id,
            location = %request.location,
            count = recommendations.len(),
            "Generated crop recommendations"
        );

        Ok(recommendations)
    }

    /// Detailed cultivation plan; unknown crops receive the default plan
    pub async fn get_detailed_plan(&self, crop_type: &str) -> CropPlan {
        simulate_latency(self.plan_latency).await;

        let kb = self.knowledge_base();
        if kb.plan_source(crop_type) == PlanSource::Defaulted {
            tracing::debug!(
                "No plan for '{}', serving {} plan",
                crop_type,
                kb.default_plan_crop()
            );
        }
        kb.lookup_plan(crop_type).clone()
    }

    /// Irrigation advice for the given weather
    pub fn irrigation_advice(
        &self,
        crop_type: &str,
        weather: &WeatherObservation,
    ) -> AppResult<Vec<String>> {
        Ok(irrigation_advice(crop_type, weather)?)
    }

    /// All known crops with their profiles, in knowledge base order
    pub fn list_crops(&self) -> Vec<CropSummary> {
        self.knowledge_base()
            .profiles()
            .map(|(crop_type, profile)| CropSummary {
                crop_type: crop_type.to_string(),
                profile: profile.clone(),
            })
            .collect()
    }

    pub fn get_profile(&self, crop_type: &str) -> AppResult<CropProfile> {
        Ok(self.knowledge_base().lookup_profile(crop_type)?.clone())
    }
}

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn service() -> (CropAdvisorService, ChannelRegistry) {
        let realtime = ChannelRegistry::new(16);
        let service = CropAdvisorService::new(&AdvisorConfig::default(), realtime.clone());
        (service, realtime)
    }

    #[tokio::test]
    async fn test_generate_publishes_inserts() {
        let (service, realtime) = service();
        let mut receiver = realtime.subscribe("crops-farmer-1");

        let request = RecommendationRequest::new("farmer-1", "Eldoret", "loamy", 3.0);
        let recommendations = service.generate_recommendations(request).await.unwrap();
        assert_eq!(recommendations.len(), 3);

        for expected in &recommendations {
            match receiver.try_recv().unwrap() {
                LiveEvent::Crops(ChangeEvent::Insert(rec)) => assert_eq!(rec.id, expected.id),
                other => panic!("unexpected event {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_invalid_farm_size() {
        let (service, _) = service();
        let request = RecommendationRequest::new("farmer-1", "Eldoret", "loamy", 0.0);
        let result = service.generate_recommendations(request).await;
        assert!(matches!(result, Err(AppError::Validation { ref field, .. }) if field == "farm_size"));
    }

    #[tokio::test]
    async fn test_unknown_plan_falls_back() {
        let (service, _) = service();
        let corn = service.get_detailed_plan("corn").await;
        let unknown = service.get_detailed_plan("dragonfruit").await;
        assert_eq!(corn, unknown);
    }

    #[test]
    fn test_profile_lookup() {
        let (service, _) = service();
        assert_eq!(service.get_profile("rice").unwrap().growing_season_days, 150);
        assert!(matches!(service.get_profile("quinoa"), Err(AppError::UnknownCrop(_))));
        assert_eq!(service.list_crops().len(), 4);
    }
}

//! WebAssembly module for the Farm Advisor dashboard
//!
//! Provides client-side computation for:
//! - Crop recommendations
//! - Detailed cultivation plans
//! - Irrigation advice
//!
//! Every export exchanges JSON strings with JavaScript.

use chrono::{DateTime, Utc};
use shared::{
    irrigation_advice, KnowledgeBase, RecommendationGenerator, RecommendationRequest, RngJitter,
    WeatherObservation,
};
use wasm_bindgen::prelude::*;

mod feed;

pub use feed::LiveFeed;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    log(&format!(
        "farm advisor ready with {} crops",
        KnowledgeBase::global().len()
    ));
}

#[cfg(target_arch = "wasm32")]
fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn log(_message: &str) {}

#[cfg(target_arch = "wasm32")]
fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn now() -> DateTime<Utc> {
    Utc::now()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

/// Crop types known to the advisor, as a JSON array
#[wasm_bindgen]
pub fn crop_types() -> Result<String, JsValue> {
    crop_types_json().map_err(|e| JsValue::from_str(&e))
}

/// Detailed plan for a crop as JSON; unknown crops receive the corn plan
#[wasm_bindgen]
pub fn get_detailed_plan(crop_type: &str) -> Result<String, JsValue> {
    detailed_plan_json(crop_type).map_err(|e| JsValue::from_str(&e))
}

/// Irrigation advice for weather given as `{temperature, rainfall, humidity}`
#[wasm_bindgen]
pub fn get_irrigation_advice(crop_type: &str, weather_json: &str) -> Result<String, JsValue> {
    irrigation_advice_json(crop_type, weather_json).map_err(|e| JsValue::from_str(&e))
}

/// Generate crop recommendations as a JSON array
#[wasm_bindgen]
pub fn generate_recommendations(
    user_id: &str,
    location: &str,
    soil_type: &str,
    farm_size: f64,
) -> Result<String, JsValue> {
    recommendations_json(user_id, location, soil_type, farm_size, now())
        .map_err(|e| JsValue::from_str(&e))
}

fn crop_types_json() -> Result<String, String> {
    let names: Vec<&str> = KnowledgeBase::global().crop_types().collect();
    to_json(&names)
}

fn detailed_plan_json(crop_type: &str) -> Result<String, String> {
    to_json(KnowledgeBase::global().lookup_plan(crop_type))
}

fn irrigation_advice_json(crop_type: &str, weather_json: &str) -> Result<String, String> {
    let weather: WeatherObservation = serde_json::from_str(weather_json)
        .map_err(|e| format!("Invalid weather JSON: {}", e))?;
    let advice = irrigation_advice(crop_type, &weather).map_err(|e| e.to_string())?;
    to_json(&advice)
}

fn recommendations_json(
    user_id: &str,
    location: &str,
    soil_type: &str,
    farm_size: f64,
    now: DateTime<Utc>,
) -> Result<String, String> {
    let request = RecommendationRequest::new(user_id, location, soil_type, farm_size);
    let mut jitter = RngJitter::from_entropy();
    let recommendations = RecommendationGenerator::default()
        .generate(&request, &mut jitter, now)
        .map_err(|e| e.to_string())?;
    to_json(&recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_types() {
        assert_eq!(
            crop_types_json().unwrap(),
            r#"["corn","rice","wheat","tomatoes"]"#
        );
    }

    #[test]
    fn test_plan_fallback() {
        assert_eq!(
            detailed_plan_json("kale").unwrap(),
            detailed_plan_json("corn").unwrap()
        );
    }

    #[test]
    fn test_irrigation_advice_json() {
        let advice = irrigation_advice_json(
            "corn",
            r#"{"temperature": 22, "rainfall": 10, "humidity": 55}"#,
        )
        .unwrap();
        assert_eq!(advice, r#"["maintain regular watering schedule."]"#);

        assert!(irrigation_advice_json("corn", "not json").is_err());
        assert!(irrigation_advice_json(
            "corn",
            r#"{"temperature": 22, "rainfall": -1, "humidity": 55}"#
        )
        .is_err());
    }

    #[test]
    fn test_recommendations_json() {
        let json = recommendations_json("user-1", "Kitale", "loamy", 1.5, Utc::now()).unwrap();
        let recs: Vec<CropRecommendation> = serde_json::from_str(&json).unwrap();
        assert_eq!(recs.len(), 3);
        assert!(recs.iter().all(|r| r.user_id == "user-1"));

        let err = recommendations_json("user-1", "Kitale", "loamy", 0.0, Utc::now()).unwrap_err();
        assert!(err.contains("farm_size"));
    }
}

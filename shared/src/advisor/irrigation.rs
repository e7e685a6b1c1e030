//! Weather-conditioned irrigation advice

use serde::{Deserialize, Serialize};

use crate::error::AdvisorResult;
use crate::models::WeatherObservation;
use crate::validation::ensure_valid;

/// Rainfall below this (mm) is treated as drought
pub const DROUGHT_RAINFALL_MM: f64 = 5.0;

/// Temperature above this (°C) calls for more frequent watering
pub const HIGH_TEMPERATURE_C: f64 = 30.0;

/// Humidity below this (%) calls for early-morning watering
pub const LOW_HUMIDITY_PERCENT: f64 = 40.0;

/// A short-term watering instruction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationDirective {
    WaterImmediately,
    IncreaseFrequency,
    WaterEarlyMorning,
    MaintainSchedule,
}

impl IrrigationDirective {
    pub fn message(&self) -> &'static str {
        match self {
            IrrigationDirective::WaterImmediately => {
                "water immediately — drought conditions detected."
            }
            IrrigationDirective::IncreaseFrequency => {
                "increase watering frequency due to high temperature."
            }
            IrrigationDirective::WaterEarlyMorning => {
                "water in early morning to reduce evaporation."
            }
            IrrigationDirective::MaintainSchedule => "maintain regular watering schedule.",
        }
    }
}

impl std::fmt::Display for IrrigationDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Evaluate every rule against `weather`, in fixed order
///
/// Rules are independent, so several may fire together. When none fires
/// the result is a single [`IrrigationDirective::MaintainSchedule`].
/// `crop_type` is accepted for crop-specific rules but no rule uses it yet.
pub fn evaluate_irrigation(
    _crop_type: &str,
    weather: &WeatherObservation,
) -> AdvisorResult<Vec<IrrigationDirective>> {
    ensure_valid(weather)?;

    let mut directives = Vec::new();

    if weather.rainfall < DROUGHT_RAINFALL_MM {
        directives.push(IrrigationDirective::WaterImmediately);
    }

    if weather.temperature > HIGH_TEMPERATURE_C {
        directives.push(IrrigationDirective::IncreaseFrequency);
    }

    if weather.humidity < LOW_HUMIDITY_PERCENT {
        directives.push(IrrigationDirective::WaterEarlyMorning);
    }

    if directives.is_empty() {
        directives.push(IrrigationDirective::MaintainSchedule);
    }

    Ok(directives)
}

/// Irrigation directives rendered as advisory text
pub fn irrigation_advice(crop_type: &str, weather: &WeatherObservation) -> AdvisorResult<Vec<String>> {
    Ok(evaluate_irrigation(crop_type, weather)?
        .iter()
        .map(|d| d.message().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdvisorError;

    #[test]
    fn test_all_rules_fire_in_order() {
        let weather = WeatherObservation::new(35.0, 2.0, 30.0);
        let advice = irrigation_advice("corn", &weather).unwrap();
        assert_eq!(
            advice,
            vec![
                "water immediately — drought conditions detected.",
                "increase watering frequency due to high temperature.",
                "water in early morning to reduce evaporation.",
            ]
        );
    }

    #[test]
    fn test_no_rule_gives_default() {
        let weather = WeatherObservation::new(22.0, 10.0, 55.0);
        assert_eq!(
            irrigation_advice("corn", &weather).unwrap(),
            vec!["maintain regular watering schedule."]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Exactly at each threshold no rule fires
        let weather = WeatherObservation::new(30.0, 5.0, 40.0);
        assert_eq!(
            evaluate_irrigation("rice", &weather).unwrap(),
            vec![IrrigationDirective::MaintainSchedule]
        );
    }

    #[test]
    fn test_single_rule() {
        let weather = WeatherObservation::new(31.0, 12.0, 70.0);
        assert_eq!(
            evaluate_irrigation("tomatoes", &weather).unwrap(),
            vec![IrrigationDirective::IncreaseFrequency]
        );
    }

    #[test]
    fn test_crop_type_does_not_change_advice() {
        let weather = WeatherObservation::new(33.0, 1.0, 80.0);
        let corn = irrigation_advice("corn", &weather).unwrap();
        assert_eq!(irrigation_advice("unknown", &weather).unwrap(), corn);
    }

    #[test]
    fn test_malformed_weather_rejected() {
        let weather = WeatherObservation::new(f64::NAN, 10.0, 55.0);
        assert!(matches!(
            irrigation_advice("corn", &weather),
            Err(AdvisorError::InvalidInput { .. })
        ));
    }
}

//! Validation utilities for the Farm Advisor dashboard
//!
//! Request types implement [`validator::Validate`] so the HTTP layer and the
//! browser can check input up front; the advisory core calls
//! [`ensure_valid`] and surfaces the first problem as
//! [`AdvisorError::InvalidInput`].

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::advisor::{BASE_YIELD_PER_AREA, YIELD_SPREAD};
use crate::error::{AdvisorError, AdvisorResult};
use crate::models::{NewAlert, NewFieldReport, RecommendationRequest, WeatherObservation};

/// A single failed check, in evaluation order
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub code: &'static str,
    pub message: &'static str,
}

/// Types that can list their validation problems in a stable order
pub trait FieldChecks {
    fn field_issues(&self) -> Vec<FieldIssue>;
}

fn collect_errors(issues: Vec<FieldIssue>) -> Result<(), ValidationErrors> {
    if issues.is_empty() {
        return Ok(());
    }
    let mut errors = ValidationErrors::new();
    for issue in issues {
        let mut error = ValidationError::new(issue.code);
        error.message = Some(Cow::Borrowed(issue.message));
        errors.add(issue.field, error);
    }
    Err(errors)
}

/// Check `value` and convert the first failure into an [`AdvisorError`]
pub fn ensure_valid<T: FieldChecks>(value: &T) -> AdvisorResult<()> {
    match value.field_issues().into_iter().next() {
        Some(issue) => Err(AdvisorError::invalid(issue.field, issue.message)),
        None => Ok(()),
    }
}

// ============================================================================
// Advisory Inputs
// ============================================================================

impl FieldChecks for RecommendationRequest {
    fn field_issues(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if self.user_id.trim().is_empty() {
            issues.push(FieldIssue {
                field: "user_id",
                code: "required",
                message: "User id must not be empty",
            });
        }
        if let Err(message) = validate_farm_size(self.farm_size) {
            issues.push(FieldIssue {
                field: "farm_size",
                code: "positive",
                message,
            });
        }
        issues
    }
}

impl Validate for RecommendationRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        collect_errors(self.field_issues())
    }
}

impl FieldChecks for WeatherObservation {
    fn field_issues(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if !self.temperature.is_finite() {
            issues.push(FieldIssue {
                field: "temperature",
                code: "finite",
                message: "Temperature must be a finite number",
            });
        }
        if !self.rainfall.is_finite() {
            issues.push(FieldIssue {
                field: "rainfall",
                code: "finite",
                message: "Rainfall must be a finite number",
            });
        } else if self.rainfall < 0.0 {
            issues.push(FieldIssue {
                field: "rainfall",
                code: "range",
                message: "Rainfall cannot be negative",
            });
        }
        if let Err(message) = validate_percentage(self.humidity) {
            issues.push(FieldIssue {
                field: "humidity",
                code: "range",
                message,
            });
        }
        issues
    }
}

impl Validate for WeatherObservation {
    fn validate(&self) -> Result<(), ValidationErrors> {
        collect_errors(self.field_issues())
    }
}

// ============================================================================
// Feed Inputs
// ============================================================================

fn require(issues: &mut Vec<FieldIssue>, field: &'static str, value: &str, message: &'static str) {
    if value.trim().is_empty() {
        issues.push(FieldIssue {
            field,
            code: "required",
            message,
        });
    }
}

impl FieldChecks for NewAlert {
    fn field_issues(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        require(&mut issues, "user_id", &self.user_id, "User id must not be empty");
        require(&mut issues, "title", &self.title, "Alert title must not be empty");
        issues
    }
}

impl Validate for NewAlert {
    fn validate(&self) -> Result<(), ValidationErrors> {
        collect_errors(self.field_issues())
    }
}

impl FieldChecks for NewFieldReport {
    fn field_issues(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        require(&mut issues, "user_id", &self.user_id, "User id must not be empty");
        if let Err(message) = validate_percentage(self.soil_moisture) {
            issues.push(FieldIssue {
                field: "soil_moisture",
                code: "range",
                message,
            });
        }
        issues
    }
}

impl Validate for NewFieldReport {
    fn validate(&self) -> Result<(), ValidationErrors> {
        collect_errors(self.field_issues())
    }
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate farm size is a positive, finite area
///
/// The area must also be small enough that the largest expected yield
/// stays finite.
pub fn validate_farm_size(farm_size: f64) -> Result<(), &'static str> {
    if !farm_size.is_finite() {
        return Err("Farm size must be a finite number");
    }
    if farm_size <= 0.0 {
        return Err("Farm size must be greater than zero");
    }
    if !(farm_size * (BASE_YIELD_PER_AREA + YIELD_SPREAD)).is_finite() {
        return Err("Farm size is too large");
    }
    Ok(())
}

/// Validate a percentage such as humidity or soil moisture
pub fn validate_percentage(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Percentage must be a finite number");
    }
    if !(0.0..=100.0).contains(&value) {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

/// Validate a crop type identifier (lowercase letters and underscores)
pub fn validate_crop_type(crop_type: &str) -> Result<(), &'static str> {
    if crop_type.is_empty() {
        return Err("Crop type must not be empty");
    }
    if !crop_type.chars().all(|c| c.is_ascii_lowercase() || c == '_') {
        return Err("Crop type must be lowercase letters and underscores only");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Advisory Input Tests
    // ========================================================================

    #[test]
    fn test_recommendation_request_valid() {
        let request = RecommendationRequest::new("user-1", "Nakuru", "loamy", 2.5);
        assert!(request.validate().is_ok());
        assert!(ensure_valid(&request).is_ok());
    }

    #[test]
    fn test_recommendation_request_non_positive_farm_size() {
        for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let request = RecommendationRequest::new("user-1", "Nakuru", "loamy", size);
            assert!(request.validate().is_err());
            match ensure_valid(&request) {
                Err(AdvisorError::InvalidInput { field, .. }) => assert_eq!(field, "farm_size"),
                other => panic!("expected invalid farm size, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_farm_size_too_large_for_yield() {
        assert!(validate_farm_size(1e300).is_ok());
        assert_eq!(validate_farm_size(1e306), Err("Farm size is too large"));
        assert_eq!(validate_farm_size(f64::MAX), Err("Farm size is too large"));
    }

    #[test]
    fn test_recommendation_request_empty_user() {
        let request = RecommendationRequest::new("  ", "Nakuru", "loamy", 1.0);
        match ensure_valid(&request) {
            Err(AdvisorError::InvalidInput { field, .. }) => assert_eq!(field, "user_id"),
            other => panic!("expected invalid user id, got {:?}", other),
        }
    }

    #[test]
    fn test_weather_observation_valid() {
        assert!(WeatherObservation::new(22.0, 10.0, 55.0).validate().is_ok());
        assert!(WeatherObservation::new(-5.0, 0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_weather_observation_malformed() {
        assert!(WeatherObservation::new(f64::NAN, 10.0, 55.0).validate().is_err());
        assert!(WeatherObservation::new(22.0, -1.0, 55.0).validate().is_err());
        assert!(WeatherObservation::new(22.0, 10.0, 140.0).validate().is_err());

        let issues = WeatherObservation::new(f64::NAN, f64::NAN, 55.0).field_issues();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "temperature");
        assert_eq!(issues[1].field, "rainfall");
    }

    // ========================================================================
    // Feed Input Tests
    // ========================================================================

    #[test]
    fn test_new_alert_requires_title() {
        let alert = NewAlert {
            user_id: "user-1".to_string(),
            alert_type: crate::models::AlertType::Weather,
            severity: crate::models::AlertSeverity::High,
            title: " ".to_string(),
            description: "Storm front".to_string(),
            action_required: String::new(),
        };
        let issues = alert.field_issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "title");
        assert!(alert.validate().is_err());
    }

    #[test]
    fn test_new_field_report_soil_moisture_range() {
        let mut report = NewFieldReport {
            user_id: "user-1".to_string(),
            crop_status: "healthy".to_string(),
            weather_conditions: "dry".to_string(),
            soil_moisture: 35.0,
            pest_issues: vec![],
            growth_stage: "vegetative".to_string(),
            photos: vec![],
        };
        assert!(ensure_valid(&report).is_ok());

        report.soil_moisture = 120.0;
        match ensure_valid(&report) {
            Err(AdvisorError::InvalidInput { field, .. }) => assert_eq!(field, "soil_moisture"),
            other => panic!("expected invalid soil moisture, got {:?}", other),
        }
    }

    // ========================================================================
    // General Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage(0.0).is_ok());
        assert!(validate_percentage(100.0).is_ok());
        assert!(validate_percentage(100.1).is_err());
        assert!(validate_percentage(-0.1).is_err());
    }

    #[test]
    fn test_validate_crop_type() {
        assert!(validate_crop_type("corn").is_ok());
        assert!(validate_crop_type("sweet_potato").is_ok());
        assert!(validate_crop_type("").is_err());
        assert!(validate_crop_type("Corn").is_err());
        assert!(validate_crop_type("corn;drop").is_err());
    }
}

//! Weather data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Identified;

/// The weather fields consumed by the irrigation advisor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherObservation {
    /// Degrees Celsius
    pub temperature: f64,
    /// Recent rainfall total in millimetres
    pub rainfall: f64,
    /// Relative humidity percentage
    pub humidity: f64,
}

impl WeatherObservation {
    pub fn new(temperature: f64, rainfall: f64, humidity: f64) -> Self {
        Self {
            temperature,
            rainfall,
            humidity,
        }
    }
}

/// A weather report for a location, current or forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    pub id: Uuid,
    pub location: String,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    /// Metres per second
    pub wind_speed: f64,
    pub forecast_date: DateTime<Utc>,
    pub description: String,
    pub alerts: Vec<String>,
}

impl From<&WeatherReport> for WeatherObservation {
    fn from(report: &WeatherReport) -> Self {
        WeatherObservation {
            temperature: report.temperature,
            rainfall: report.rainfall,
            humidity: report.humidity,
        }
    }
}

impl Identified for WeatherReport {
    fn entity_id(&self) -> Uuid {
        self.id
    }
}

//! Randomized weather source used when no weather API key is configured

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use shared::WeatherReport;
use uuid::Uuid;

use super::weather::derive_alerts;

/// Sampling ranges for one kind of report
#[derive(Debug, Clone, Copy)]
struct Ranges {
    temperature: (f64, f64),
    humidity: (f64, f64),
    rainfall: (f64, f64),
    wind_speed: (f64, f64),
}

const CURRENT: Ranges = Ranges {
    temperature: (28.0, 38.0),
    humidity: (65.0, 85.0),
    rainfall: (0.0, 10.0),
    wind_speed: (5.0, 15.0),
};

const FORECAST: Ranges = Ranges {
    temperature: (25.0, 40.0),
    humidity: (60.0, 85.0),
    rainfall: (0.0, 15.0),
    wind_speed: (3.0, 15.0),
};

const DESCRIPTIONS: [&str; 4] = ["Sunny", "Partly cloudy", "Cloudy", "Light rain"];

/// Generates plausible tropical weather for demos and offline runs
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoWeatherSource;

impl DemoWeatherSource {
    pub fn new() -> Self {
        Self
    }

    /// Current conditions for a location
    pub fn current<R: Rng + ?Sized>(&self, rng: &mut R, location: &str, now: DateTime<Utc>) -> WeatherReport {
        sample(rng, &CURRENT, location, now, "Partly cloudy")
    }

    /// One report per day starting tomorrow
    pub fn forecast<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        location: &str,
        days: usize,
        now: DateTime<Utc>,
    ) -> Vec<WeatherReport> {
        (1..=days as i64)
            .map(|offset| {
                let description = DESCRIPTIONS[rng.gen_range(0..DESCRIPTIONS.len())];
                sample(rng, &FORECAST, location, now + Duration::days(offset), description)
            })
            .collect()
    }
}

fn sample<R: Rng + ?Sized>(
    rng: &mut R,
    ranges: &Ranges,
    location: &str,
    date: DateTime<Utc>,
    description: &str,
) -> WeatherReport {
    let temperature = rng.gen_range(ranges.temperature.0..ranges.temperature.1);
    let humidity = rng.gen_range(ranges.humidity.0..ranges.humidity.1);
    let rainfall = rng.gen_range(ranges.rainfall.0..ranges.rainfall.1);
    let wind_speed = rng.gen_range(ranges.wind_speed.0..ranges.wind_speed.1);

    WeatherReport {
        id: Uuid::new_v4(),
        location: location.to_string(),
        temperature,
        humidity,
        rainfall,
        wind_speed,
        forecast_date: date,
        description: description.to_string(),
        alerts: derive_alerts(temperature, rainfall, humidity),
    }
}

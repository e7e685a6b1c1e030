//! Configuration management for the Farm Advisor backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with FARM__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Crop advisor configuration
    pub advisor: AdvisorConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// Real-time channel configuration
    pub realtime: RealtimeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AdvisorConfig {
    /// Simulated think-time before recommendations are returned
    pub recommendation_latency_ms: u64,

    /// Simulated think-time before a detailed plan is returned
    pub plan_latency_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// OpenWeatherMap-compatible API endpoint
    pub api_endpoint: String,

    /// API key; demo data is served when absent
    pub api_key: Option<String>,

    /// Default number of forecast days
    pub forecast_days: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RealtimeConfig {
    /// Buffered events per channel before slow subscribers lag
    pub channel_capacity: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FARM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("advisor.recommendation_latency_ms", 0)?
            .set_default("advisor.plan_latency_ms", 0)?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.forecast_days", 7)?
            .set_default("realtime.channel_capacity", 64)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FARM__ prefix)
            .add_source(
                Environment::with_prefix("FARM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            advisor: AdvisorConfig::default(),
            weather: WeatherConfig::default(),
            realtime: RealtimeConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://api.openweathermap.org/data/2.5".to_string(),
            api_key: None,
            forecast_days: 7,
        }
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_uses_defaults() {
        let config = Config::load().unwrap();
        assert!(config.realtime.channel_capacity > 0);
        assert!(config.weather.forecast_days > 0);
    }
}

//! External API integrations

pub mod demo_weather;
pub mod weather;

pub use demo_weather::DemoWeatherSource;
pub use weather::WeatherClient;

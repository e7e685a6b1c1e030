//! Business logic services for the Farm Advisor backend

pub mod crop_advisor;
pub mod realtime;
pub mod weather;

pub use crop_advisor::CropAdvisorService;
pub use realtime::{ChannelRegistry, LiveEvent};
pub use weather::WeatherService;

//! Crop advisory core
//!
//! - [`KnowledgeBase`]: immutable crop profiles and cultivation plans
//! - [`RecommendationGenerator`]: candidate crops for a grower
//! - [`irrigation_advice`]: weather-conditioned watering directives

mod catalog;
mod irrigation;
mod knowledge_base;
mod recommendation;

pub use irrigation::*;
pub use knowledge_base::*;
pub use recommendation::*;

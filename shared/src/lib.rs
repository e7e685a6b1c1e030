//! Shared types and advisory logic for the Farm Advisor dashboard
//!
//! This crate contains the domain models, validation rules and the crop
//! advisory core shared between the backend, the browser (via WASM), and
//! other components of the system.

pub mod advisor;
pub mod error;
pub mod live;
pub mod models;
pub mod types;
pub mod validation;

pub use advisor::*;
pub use error::*;
pub use live::*;
pub use models::*;
pub use types::*;
pub use validation::*;

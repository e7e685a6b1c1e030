//! HTTP handlers for the Farm Advisor API

pub mod crops;
pub mod health;
pub mod realtime;
pub mod weather;

pub use crops::*;
pub use health::*;
pub use realtime::*;
pub use weather::*;

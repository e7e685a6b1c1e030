//! Domain models for the Farm Advisor dashboard

mod alert;
mod crop;
mod field_report;
mod plan;
mod recommendation;
mod weather;

pub use alert::*;
pub use crop::*;
pub use field_report::*;
pub use plan::*;
pub use recommendation::*;
pub use weather::*;

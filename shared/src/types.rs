//! Common types used across the platform

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An inclusive numeric range such as a temperature or rainfall band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Both bounds finite and `min <= max`
    pub fn is_ordered(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Entities that carry a stable identity for change-event merging
pub trait Identified {
    fn entity_id(&self) -> Uuid;
}

/// Kind of change carried by a real-time notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A change notification delivered on a channel
///
/// Insert and update carry the new record; delete carries the old one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event_type", content = "record", rename_all = "UPPERCASE")]
pub enum ChangeEvent<T> {
    Insert(T),
    Update(T),
    Delete(T),
}

impl<T> ChangeEvent<T> {
    pub fn kind(&self) -> ChangeKind {
        match self {
            ChangeEvent::Insert(_) => ChangeKind::Insert,
            ChangeEvent::Update(_) => ChangeKind::Update,
            ChangeEvent::Delete(_) => ChangeKind::Delete,
        }
    }

    pub fn record(&self) -> &T {
        match self {
            ChangeEvent::Insert(record) | ChangeEvent::Update(record) | ChangeEvent::Delete(record) => {
                record
            }
        }
    }

    /// Transform the payload while keeping the change kind
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ChangeEvent<U> {
        match self {
            ChangeEvent::Insert(record) => ChangeEvent::Insert(f(record)),
            ChangeEvent::Update(record) => ChangeEvent::Update(f(record)),
            ChangeEvent::Delete(record) => ChangeEvent::Delete(f(record)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range_rejects_reversed_bounds() {
        assert!(!ValueRange { min: 30.0, max: 20.0 }.is_ordered());
        assert!(!ValueRange { min: f64::NAN, max: 20.0 }.is_ordered());
        assert!(ValueRange { min: 20.0, max: 20.0 }.is_ordered());
        assert!(ValueRange { min: 20.0, max: 30.0 }.is_ordered());
    }

    #[test]
    fn test_change_event_serialization() {
        let event = ChangeEvent::Delete("abc".to_string());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "DELETE");
        assert_eq!(json["record"], "abc");
        assert_eq!(event.kind(), ChangeKind::Delete);
    }
}

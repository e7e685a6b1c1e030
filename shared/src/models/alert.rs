//! Farm alert models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Identified;

/// An alert shown on a grower's dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: Uuid,
    pub user_id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub title: String,
    pub description: String,
    pub action_required: String,
    pub created_at: DateTime<Utc>,
}

/// Subject area of an alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Weather,
    Crop,
    Market,
    Pest,
}

/// Urgency of an alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Input for raising a new alert
#[derive(Debug, Clone, Deserialize)]
pub struct NewAlert {
    pub user_id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub action_required: String,
}

impl NewAlert {
    pub fn into_alert(self, now: DateTime<Utc>) -> Alert {
        Alert {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            alert_type: self.alert_type,
            severity: self.severity,
            title: self.title,
            description: self.description,
            action_required: self.action_required,
            created_at: now,
        }
    }
}

impl Identified for Alert {
    fn entity_id(&self) -> Uuid {
        self.id
    }
}

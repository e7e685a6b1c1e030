//! Browser-side live feeds kept in step with channel change events

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::{
    Alert, ChangeEvent, CropRecommendation, FieldReport, Identified, LiveCollection,
    WeatherReport,
};
use wasm_bindgen::prelude::*;

enum Collection {
    Weather(LiveCollection<WeatherReport>),
    Crops(LiveCollection<CropRecommendation>),
    Alerts(LiveCollection<Alert>),
    Reports(LiveCollection<FieldReport>),
}

/// A dashboard list for one table, merged from change events
///
/// Weather keeps arrival order; crops, alerts and reports show the newest
/// record first.
#[wasm_bindgen]
pub struct LiveFeed {
    table: String,
    collection: Collection,
}

#[wasm_bindgen]
impl LiveFeed {
    /// Create an empty feed for `weather`, `crops`, `alerts` or `reports`
    #[wasm_bindgen(constructor)]
    pub fn new(table: &str) -> Result<LiveFeed, JsValue> {
        Self::for_table(table).map_err(|e| JsValue::from_str(&e))
    }

    /// Merge a change given as `{event_type, record}` or as a channel
    /// message `{table, change}`
    pub fn apply(&mut self, change_json: &str) -> Result<(), JsValue> {
        self.apply_json(change_json).map_err(|e| JsValue::from_str(&e))
    }

    /// Current records as a JSON array
    pub fn items(&self) -> Result<String, JsValue> {
        self.items_json().map_err(|e| JsValue::from_str(&e))
    }

    pub fn len(&self) -> usize {
        match &self.collection {
            Collection::Weather(c) => c.len(),
            Collection::Crops(c) => c.len(),
            Collection::Alerts(c) => c.len(),
            Collection::Reports(c) => c.len(),
        }
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LiveFeed {
    pub(crate) fn for_table(table: &str) -> Result<Self, String> {
        let collection = match table {
            "weather" => Collection::Weather(LiveCollection::new()),
            "crops" => Collection::Crops(LiveCollection::newest_first()),
            "alerts" => Collection::Alerts(LiveCollection::newest_first()),
            "reports" => Collection::Reports(LiveCollection::newest_first()),
            other => return Err(format!("Unknown feed table: {}", other)),
        };
        Ok(Self {
            table: table.to_string(),
            collection,
        })
    }

    pub(crate) fn apply_json(&mut self, change_json: &str) -> Result<(), String> {
        let value: Value =
            serde_json::from_str(change_json).map_err(|e| format!("Invalid change JSON: {}", e))?;
        let change = self.unwrap_envelope(value)?;

        match &mut self.collection {
            Collection::Weather(c) => merge(c, change),
            Collection::Crops(c) => merge(c, change),
            Collection::Alerts(c) => merge(c, change),
            Collection::Reports(c) => merge(c, change),
        }
    }

    pub(crate) fn items_json(&self) -> Result<String, String> {
        match &self.collection {
            Collection::Weather(c) => to_json(c.items()),
            Collection::Crops(c) => to_json(c.items()),
            Collection::Alerts(c) => to_json(c.items()),
            Collection::Reports(c) => to_json(c.items()),
        }
    }

    fn unwrap_envelope(&self, mut value: Value) -> Result<Value, String> {
        let Some(change) = value.get_mut("change").map(Value::take) else {
            return Ok(value);
        };
        match value.get("table").and_then(Value::as_str) {
            Some(table) if table == self.table => Ok(change),
            Some(table) => Err(format!(
                "Change for table '{}' sent to the '{}' feed",
                table, self.table
            )),
            None => Err("Channel message is missing its table".to_string()),
        }
    }
}

fn merge<T: Identified + DeserializeOwned>(
    collection: &mut LiveCollection<T>,
    change: Value,
) -> Result<(), String> {
    let event: ChangeEvent<T> =
        serde_json::from_value(change).map_err(|e| format!("Invalid change event: {}", e))?;
    collection.apply(event);
    Ok(())
}

fn to_json<T: Serialize>(items: &[T]) -> Result<String, String> {
    serde_json::to_string(items).map_err(|e| format!("Serialization failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use shared::{AlertSeverity, AlertType, NewAlert};

    fn alert(title: &str) -> Alert {
        NewAlert {
            user_id: "user-1".to_string(),
            alert_type: AlertType::Weather,
            severity: AlertSeverity::High,
            title: title.to_string(),
            description: "Heavy rain".to_string(),
            action_required: String::new(),
        }
        .into_alert(Utc::now())
    }

    fn change(event: &ChangeEvent<Alert>) -> String {
        serde_json::to_string(event).unwrap()
    }

    #[test]
    fn test_alert_feed_shows_newest_first() {
        let mut feed = LiveFeed::for_table("alerts").unwrap();
        feed.apply_json(&change(&ChangeEvent::Insert(alert("first")))).unwrap();
        feed.apply_json(&change(&ChangeEvent::Insert(alert("second")))).unwrap();

        let items: Vec<Alert> = serde_json::from_str(&feed.items_json().unwrap()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "second");
        assert_eq!(items[1].title, "first");
    }

    #[test]
    fn test_update_and_delete_by_id() {
        let mut feed = LiveFeed::for_table("alerts").unwrap();
        let original = alert("Storm");
        feed.apply_json(&change(&ChangeEvent::Insert(original.clone()))).unwrap();

        let mut edited = original.clone();
        edited.title = "Storm upgraded".to_string();
        feed.apply_json(&change(&ChangeEvent::Update(edited))).unwrap();
        let items: Vec<Alert> = serde_json::from_str(&feed.items_json().unwrap()).unwrap();
        assert_eq!(items[0].title, "Storm upgraded");

        feed.apply_json(&change(&ChangeEvent::Delete(alert("unrelated")))).unwrap();
        assert_eq!(feed.len(), 1);
        feed.apply_json(&change(&ChangeEvent::Delete(original))).unwrap();
        assert!(feed.is_empty());
    }

    #[test]
    fn test_channel_envelope_is_accepted() {
        let mut feed = LiveFeed::for_table("alerts").unwrap();
        let message = json!({
            "table": "alerts",
            "change": serde_json::to_value(ChangeEvent::Insert(alert("Frost"))).unwrap(),
        });
        feed.apply_json(&message.to_string()).unwrap();
        assert_eq!(feed.len(), 1);

        let wrong_table = json!({
            "table": "reports",
            "change": serde_json::to_value(ChangeEvent::Insert(alert("Frost"))).unwrap(),
        });
        assert!(feed.apply_json(&wrong_table.to_string()).is_err());
    }

    #[test]
    fn test_rejects_unknown_table_and_bad_json() {
        assert!(LiveFeed::for_table("plots").is_err());
        let mut feed = LiveFeed::for_table("crops").unwrap();
        assert!(feed.apply_json("not json").is_err());
        assert!(feed.apply_json(r#"{"event_type": "INSERT", "record": {}}"#).is_err());
    }
}

//! In-process registry of live update channels
//!
//! Each topic owns a `tokio::sync::broadcast` sender. Dashboards subscribe to
//! a topic and receive every change published after they joined.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use shared::{Alert, ChangeEvent, CropRecommendation, FieldReport, WeatherReport};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::{timeout_at, Instant};

pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Topic carrying weather for a location
pub fn weather_topic(location: &str) -> String {
    format!("weather-{}", location)
}

/// Topic carrying a user's crop recommendations
pub fn crops_topic(user_id: &str) -> String {
    format!("crops-{}", user_id)
}

pub fn alerts_topic(user_id: &str) -> String {
    format!("alerts-{}", user_id)
}

pub fn reports_topic(user_id: &str) -> String {
    format!("reports-{}", user_id)
}

const TOPIC_PREFIXES: [&str; 4] = ["weather-", "crops-", "alerts-", "reports-"];

/// Whether `topic` names one of the live feeds
pub fn is_known_topic(topic: &str) -> bool {
    TOPIC_PREFIXES.iter().any(|prefix| {
        topic
            .strip_prefix(prefix)
            .is_some_and(|rest| !rest.trim().is_empty())
    })
}

/// A change delivered over a live channel
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "table", content = "change", rename_all = "snake_case")]
pub enum LiveEvent {
    Weather(ChangeEvent<WeatherReport>),
    Crops(ChangeEvent<CropRecommendation>),
    Alerts(ChangeEvent<Alert>),
    Reports(ChangeEvent<FieldReport>),
}

/// Registry of open channels keyed by topic
#[derive(Clone)]
pub struct ChannelRegistry {
    channels: Arc<Mutex<HashMap<String, broadcast::Sender<LiveEvent>>>>,
    capacity: usize,
}

impl ChannelRegistry {
    /// Create a new registry whose channels buffer `capacity` events
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    fn channels(&self) -> MutexGuard<'_, HashMap<String, broadcast::Sender<LiveEvent>>> {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe to a topic, opening its channel on first use
    pub fn subscribe(&self, topic: &str) -> broadcast::Receiver<LiveEvent> {
        let mut channels = self.channels();
        if let Some(sender) = channels.get(topic) {
            return sender.subscribe();
        }

        tracing::debug!("Opening channel {}", topic);
        let (sender, receiver) = broadcast::channel(self.capacity);
        channels.insert(topic.to_string(), sender);
        receiver
    }

    /// Close a topic. Existing receivers observe the channel as closed.
    pub fn unsubscribe(&self, topic: &str) -> bool {
        let removed = self.channels().remove(topic).is_some();
        if removed {
            tracing::debug!("Closed channel {}", topic);
        }
        removed
    }

    /// Close every open topic
    pub fn unsubscribe_all(&self) {
        let mut channels = self.channels();
        tracing::debug!("Closing {} channels", channels.len());
        channels.clear();
    }

    /// Publish an event, returning how many subscribers received it
    ///
    /// Publishing to a topic nobody has opened delivers to no one. A topic
    /// whose last receiver has been dropped is closed here.
    pub fn publish(&self, topic: &str, event: LiveEvent) -> usize {
        let mut channels = self.channels();
        let Some(sender) = channels.get(topic) else {
            return 0;
        };

        match sender.send(event) {
            Ok(delivered) => delivered,
            Err(_) => {
                tracing::debug!("Channel {} has no receivers, closing", topic);
                channels.remove(topic);
                0
            }
        }
    }

    /// Wait up to `wait` for the next event published on `topic`
    ///
    /// Subscribes for the duration of the wait. Returns `None` on timeout or
    /// when the topic is closed while waiting.
    pub async fn next_event(&self, topic: &str, wait: Duration) -> Option<LiveEvent> {
        let mut receiver = self.subscribe(topic);
        let deadline = Instant::now() + wait;

        loop {
            match timeout_at(deadline, receiver.recv()).await {
                Ok(Ok(event)) => return Some(event),
                Ok(Err(RecvError::Lagged(skipped))) => {
                    tracing::debug!("Subscriber on {} skipped {} events", topic, skipped);
                }
                Ok(Err(RecvError::Closed)) | Err(_) => return None,
            }
        }
    }

    /// Names of open topics, sorted
    pub fn active_channels(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.channels().len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels().is_empty()
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

//! HTTP handlers that publish to live channels

use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::{ensure_valid, Alert, ChangeEvent, FieldReport, NewAlert, NewFieldReport};

use crate::error::{AppError, AppResult};
use crate::services::realtime::{alerts_topic, is_known_topic, reports_topic, LiveEvent};
use crate::AppState;

/// A stored record and the number of live subscribers it reached
#[derive(Debug, Serialize)]
pub struct Published<T> {
    pub record: T,
    pub delivered: usize,
}

/// Default long-poll wait in milliseconds
pub const DEFAULT_WAIT_MS: u64 = 25_000;
pub const MAX_WAIT_MS: u64 = 60_000;

#[derive(Debug, Deserialize)]
pub struct WaitQuery {
    pub wait_ms: Option<u64>,
}

/// The next event on a topic, or `null` when the wait timed out
#[derive(Debug, Serialize)]
pub struct NextEventResponse {
    pub topic: String,
    pub event: Option<LiveEvent>,
}

#[derive(Debug, Serialize)]
pub struct ChannelsResponse {
    pub channels: Vec<String>,
}

/// Raise an alert on the user's alert feed
pub async fn create_alert(
    State(state): State<AppState>,
    Json(input): Json<NewAlert>,
) -> AppResult<(StatusCode, Json<Published<Alert>>)> {
    ensure_valid(&input)?;

    let alert = input.into_alert(Utc::now());
    let delivered = state.realtime.publish(
        &alerts_topic(&alert.user_id),
        LiveEvent::Alerts(ChangeEvent::Insert(alert.clone())),
    );
    tracing::info!(alert_id = %alert.id, severity = ?alert.severity, "Alert raised");

    Ok((
        StatusCode::CREATED,
        Json(Published {
            record: alert,
            delivered,
        }),
    ))
}

/// Submit a field report to the user's report feed
pub async fn submit_field_report(
    State(state): State<AppState>,
    Json(input): Json<NewFieldReport>,
) -> AppResult<(StatusCode, Json<Published<FieldReport>>)> {
    ensure_valid(&input)?;

    let report = input.into_report(Utc::now());
    let delivered = state.realtime.publish(
        &reports_topic(&report.user_id),
        LiveEvent::Reports(ChangeEvent::Insert(report.clone())),
    );
    tracing::info!(report_id = %report.id, "Field report submitted");

    Ok((
        StatusCode::CREATED,
        Json(Published {
            record: report,
            delivered,
        }),
    ))
}

/// List open live channels
pub async fn list_channels(State(state): State<AppState>) -> Json<ChannelsResponse> {
    Json(ChannelsResponse {
        channels: state.realtime.active_channels(),
    })
}

/// Long-poll a live channel for its next event
pub async fn next_channel_event(
    State(state): State<AppState>,
    Path(topic): Path<String>,
    Query(query): Query<WaitQuery>,
) -> AppResult<Json<NextEventResponse>> {
    if !is_known_topic(&topic) {
        return Err(AppError::NotFound(format!("Channel '{}'", topic)));
    }
    let wait_ms = query.wait_ms.unwrap_or(DEFAULT_WAIT_MS);
    if wait_ms > MAX_WAIT_MS {
        return Err(AppError::Validation {
            field: "wait_ms".to_string(),
            message: format!("Wait must be at most {} ms", MAX_WAIT_MS),
        });
    }

    let event = state
        .realtime
        .next_event(&topic, Duration::from_millis(wait_ms))
        .await;

    Ok(Json(NextEventResponse { topic, event }))
}

//! Error handling for the Farm Advisor backend
//!
//! Translates advisory and service failures into consistent JSON responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::AdvisorError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Unknown crop type: {0}")]
    UnknownCrop(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // External service errors
    #[error("Weather service unavailable")]
    WeatherServiceUnavailable,

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<AdvisorError> for AppError {
    fn from(err: AdvisorError) -> Self {
        match err {
            AdvisorError::InvalidInput { field, message } => AppError::Validation { field, message },
            AdvisorError::UnknownCrop(crop_type) => AppError::UnknownCrop(crop_type),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// HTTP status and body for this error
    pub fn detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::UnknownCrop(crop_type) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "UNKNOWN_CROP".to_string(),
                    message: format!("No crop profile exists for '{}'", crop_type),
                    field: Some("crop_type".to_string()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::WeatherServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "WEATHER_SERVICE_UNAVAILABLE".to_string(),
                    message: "Weather service is temporarily unavailable".to_string(),
                    field: None,
                },
            ),
            AppError::ExternalService(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "EXTERNAL_SERVICE_ERROR".to_string(),
                    message: format!("External service error: {}", msg),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message: format!("Configuration error: {}", msg),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    field: None,
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.detail();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisor_errors_map_to_status() {
        let invalid: AppError = AdvisorError::invalid("farm_size", "must be positive").into();
        let (status, detail) = invalid.detail();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(detail.field.as_deref(), Some("farm_size"));

        let unknown: AppError = AdvisorError::UnknownCrop("quinoa".to_string()).into();
        let (status, detail) = unknown.detail();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(detail.code, "UNKNOWN_CROP");
        assert!(detail.message.contains("quinoa"));
    }
}

//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Dashboard engine error
    Dashboard(DashboardError),
}

impl AppError {
    pub fn session_not_found(session_id: &str) -> Self {
        AppError::NotFound(format!("Session '{}' not found", session_id))
    }
}

fn dashboard_status(err: &DashboardError) -> StatusCode {
    match err {
        DashboardError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        DashboardError::NoValidSelection { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DashboardError::RenderUnavailable(_) => StatusCode::NOT_IMPLEMENTED,
        DashboardError::NoChartToExport => StatusCode::CONFLICT,
        DashboardError::UnknownOption { .. } => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Dashboard(e) => {
                let error = match &e {
                    DashboardError::NoValidSelection { dimension, .. } => {
                        ApiError::new(e.code(), e.to_string())
                            .with_details(format!("dimension={}", dimension))
                    }
                    DashboardError::UnknownOption { field, .. } => {
                        ApiError::new(e.code(), e.to_string())
                            .with_details(format!("field={}", field))
                    }
                    _ => ApiError::new(e.code(), e.to_string()),
                };
                (dashboard_status(&e), error)
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        AppError::Dashboard(err)
    }
}

//! Failure taxonomy of the dashboard engine.
//!
//! Filtering to an empty series is not an error; it renders as an empty chart.

use thiserror::Error;

use crate::models::Dimension;

/// Result type for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// The upstream store could not supply a complete dataset. Fatal at startup.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// A dependent domain is empty after an indicator change.
    #[error("No data for indicator '{indicator}': {dimension} has no options")]
    NoValidSelection {
        indicator: String,
        dimension: Dimension,
    },

    /// The rendering backend cannot produce the requested format.
    #[error("Render unavailable: {0}")]
    RenderUnavailable(String),

    /// Export was requested before anything was rendered in this session.
    #[error("No chart to export: apply a selection first")]
    NoChartToExport,

    /// A staged value is not among the current options for its field.
    #[error("Unknown option for {field}: '{value}'")]
    UnknownOption { field: String, value: String },
}

impl DashboardError {
    /// Stable machine-readable code for the presentation layer.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DataUnavailable(_) => "DATA_UNAVAILABLE",
            Self::NoValidSelection { .. } => "NO_VALID_SELECTION",
            Self::RenderUnavailable(_) => "RENDER_UNAVAILABLE",
            Self::NoChartToExport => "NO_CHART_TO_EXPORT",
            Self::UnknownOption { .. } => "UNKNOWN_OPTION",
        }
    }

    /// Whether the session can continue after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::DataUnavailable(_))
    }

    pub fn unknown_option(field: impl Into<String>, value: impl ToString) -> Self {
        Self::UnknownOption {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

//! Chart specification builder.

use serde::{Deserialize, Serialize};

use crate::routes::chart::{Axis, ChartLayout, ChartSpec, HoverMode, ResolvedSeries, Trace};

pub const X_AXIS_TITLE: &str = "Year";
pub const DEFAULT_METRIC_NAME: &str = "Periodic Labour Force Survey";
pub const TRACE_MODE: &str = "lines+markers";
pub const MARKER_SIZE: u32 = 15;

/// Presentation settings shared by every chart of a deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// Y-axis title.
    pub metric_name: String,
    pub title: Option<String>,
    pub marker_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            metric_name: DEFAULT_METRIC_NAME.to_string(),
            title: None,
            marker_size: MARKER_SIZE,
        }
    }
}

/// Build a single line+marker trace chart from a series.
///
/// An empty series still produces a complete chart with one empty trace.
pub fn render(series: &ResolvedSeries, style: &ChartStyle) -> ChartSpec {
    ChartSpec {
        traces: vec![Trace {
            name: style.metric_name.clone(),
            mode: TRACE_MODE.to_string(),
            x: series.years(),
            y: series.values(),
            marker_size: style.marker_size,
        }],
        layout: ChartLayout {
            title: style.title.clone(),
            x_axis: Axis {
                title: X_AXIS_TITLE.to_string(),
            },
            y_axis: Axis {
                title: style.metric_name.clone(),
            },
            hover_mode: HoverMode::Closest,
        },
    }
}

//! Public API surface for the dashboard backend.
//!
//! This file consolidates the DTO types exchanged with the presentation layer.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::error::{DashboardError, DashboardResult};
pub use crate::models::{Dataset, DatasetView, Dimension, FactRow, YearChoice, SELECT_ALL};
pub use crate::routes::chart::{
    Axis, ChartLayout, ChartSpec, HoverMode, ResolvedSeries, SeriesOrder, SeriesPoint, Trace,
};
pub use crate::routes::export::{ExportedImage, ImageFormat};
pub use crate::routes::options::{DomainSet, FilterOptions};
pub use crate::routes::selection::{SelectionState, SelectionUpdate};

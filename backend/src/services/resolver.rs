//! Selection resolution: from a staged selection to the points of a chart.

use std::collections::HashSet;

use log::{debug, warn};

use crate::models::{Dataset, Dimension};
use crate::routes::chart::{ResolvedSeries, SeriesOrder, SeriesPoint};
use crate::routes::selection::SelectionState;

/// Years a selection admits.
///
/// With the `"Select All"` sentinel present this is every year of the
/// unfiltered dataset, not only the years of the selected indicator.
pub fn effective_years(dataset: &Dataset, selection: &SelectionState) -> HashSet<i32> {
    if selection.selects_all_years() {
        dataset.years().into_iter().collect()
    } else {
        selection.years.iter().filter_map(|y| y.year()).collect()
    }
}

/// Resolve a selection into a series ordered by year (stable for equal years).
pub fn resolve(dataset: &Dataset, selection: &SelectionState) -> ResolvedSeries {
    resolve_with_order(dataset, selection, SeriesOrder::default())
}

/// Resolve a selection into a series, one point per matching row.
///
/// Descriptive names are compared exactly. Rows sharing a year are kept as
/// separate points. An empty result is valid and means "no matching data".
pub fn resolve_with_order(
    dataset: &Dataset,
    selection: &SelectionState,
    order: SeriesOrder,
) -> ResolvedSeries {
    let matching = dataset.filter(|row| {
        Dimension::ALL
            .iter()
            .all(|d| d.name_of(row) == selection.name(*d))
    });

    let years = effective_years(dataset, selection);
    let mut points: Vec<SeriesPoint> = matching
        .iter()
        .filter(|row| years.contains(&row.year))
        .map(|row| SeriesPoint {
            year: row.year,
            value: row.value,
        })
        .collect();

    if order == SeriesOrder::YearAscending {
        points.sort_by_key(|p| p.year);
    }

    if points.is_empty() {
        warn!(
            "No data for indicator='{}' region='{}' sector='{}' gender='{}' status='{}' years={:?}",
            selection.indicator,
            selection.region,
            selection.sector,
            selection.gender,
            selection.status,
            selection.years
        );
    } else {
        debug!(
            "Resolved {} points ({} rows before year filter) for '{}'",
            points.len(),
            matching.len(),
            selection.indicator
        );
    }

    ResolvedSeries { points }
}

use serde::{Deserialize, Serialize};

/// One (year, value) pair of a resolved series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: f64,
}

/// Points backing a chart, one per matching fact row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSeries {
    pub points: Vec<SeriesPoint>,
}

impl ResolvedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.year).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

impl From<Vec<(i32, f64)>> for ResolvedSeries {
    fn from(pairs: Vec<(i32, f64)>) -> Self {
        Self {
            points: pairs
                .into_iter()
                .map(|(year, value)| SeriesPoint { year, value })
                .collect(),
        }
    }
}

/// Ordering applied to a resolved series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesOrder {
    /// Stable sort by year; rows sharing a year keep their input order.
    #[default]
    YearAscending,
    /// Input row order, untouched.
    RowOrder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
    #[default]
    Closest,
    X,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub hover_mode: HoverMode,
}

/// A line+marker trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub name: String,
    pub mode: String,
    pub x: Vec<i32>,
    pub y: Vec<f64>,
    pub marker_size: u32,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Renderer-independent chart description handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub traces: Vec<Trace>,
    pub layout: ChartLayout,
}

impl ChartSpec {
    /// Total number of plotted points across traces.
    pub fn point_count(&self) -> usize {
        self.traces.iter().map(Trace::len).sum()
    }
}

pub const GET_CHART: &str = "get_chart";
pub const RESOLVE_CHART: &str = "resolve_chart";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_from_pairs() {
        let series = ResolvedSeries::from(vec![(2019, 41.2), (2020, 43.5)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.years(), vec![2019, 2020]);
        assert_eq!(series.values(), vec![41.2, 43.5]);
    }

    #[test]
    fn test_series_order_serde() {
        let order: SeriesOrder = serde_json::from_str(r#""row_order""#).unwrap();
        assert_eq!(order, SeriesOrder::RowOrder);
        assert_eq!(SeriesOrder::default(), SeriesOrder::YearAscending);
    }

    #[test]
    fn test_hover_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&HoverMode::Closest).unwrap(), r#""closest""#);
    }
}

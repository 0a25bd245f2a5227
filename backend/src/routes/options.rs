use serde::{Deserialize, Serialize};

use crate::models::{Dimension, YearChoice};

/// Option lists for the dimensions that depend on the selected indicator.
///
/// Every list keeps the first-seen order of the underlying rows; `year` starts
/// with the `"Select All"` sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainSet {
    pub region: Vec<String>,
    pub sector: Vec<String>,
    pub gender: Vec<String>,
    pub year: Vec<YearChoice>,
    pub status: Vec<String>,
}

impl DomainSet {
    /// Options for a descriptive dimension. Indicator options are not part of a domain set.
    pub fn names(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Region => &self.region,
            Dimension::Sector => &self.sector,
            Dimension::Gender => &self.gender,
            Dimension::Status => &self.status,
            Dimension::Indicator => &[],
        }
    }

    /// First dependent dimension with no options, if any.
    pub fn first_empty(&self) -> Option<Dimension> {
        Dimension::DEPENDENT
            .into_iter()
            .find(|d| self.names(*d).is_empty())
    }
}

/// Option lists for every selector, seeded from the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub indicator: Vec<String>,
    #[serde(flatten)]
    pub domains: DomainSet,
}

pub const GET_INITIAL_OPTIONS: &str = "get_initial_options";
pub const ON_INDICATOR_CHANGE: &str = "on_indicator_change";

use serde::{Deserialize, Serialize};

use crate::models::{Dimension, YearChoice};

pub const DEFAULT_INDICATOR: &str = "Labour Force Participation Rate (LFPR)";
pub const DEFAULT_REGION: &str = "All India";
pub const DEFAULT_SECTOR: &str = "Rural + Urban";
pub const DEFAULT_GENDER: &str = "person";
pub const DEFAULT_STATUS: &str = "Usual Status (ps+ss)";

/// The tuple a user has staged in the selectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionState {
    pub indicator: String,
    pub region: String,
    pub sector: String,
    pub gender: String,
    pub years: Vec<YearChoice>,
    pub status: String,
}

impl Default for SelectionState {
    /// The all-India LFPR view every new session starts from.
    fn default() -> Self {
        Self {
            indicator: DEFAULT_INDICATOR.to_string(),
            region: DEFAULT_REGION.to_string(),
            sector: DEFAULT_SECTOR.to_string(),
            gender: DEFAULT_GENDER.to_string(),
            years: vec![YearChoice::All],
            status: DEFAULT_STATUS.to_string(),
        }
    }
}

impl SelectionState {
    pub fn name(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Indicator => &self.indicator,
            Dimension::Region => &self.region,
            Dimension::Sector => &self.sector,
            Dimension::Gender => &self.gender,
            Dimension::Status => &self.status,
        }
    }

    pub fn set_name(&mut self, dimension: Dimension, value: impl Into<String>) {
        let value = value.into();
        match dimension {
            Dimension::Indicator => self.indicator = value,
            Dimension::Region => self.region = value,
            Dimension::Sector => self.sector = value,
            Dimension::Gender => self.gender = value,
            Dimension::Status => self.status = value,
        }
    }

    /// Whether the year list contains the `"Select All"` sentinel.
    pub fn selects_all_years(&self) -> bool {
        self.years.iter().any(YearChoice::is_all)
    }
}

/// Partial change to the staged selection. Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<Vec<YearChoice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl SelectionUpdate {
    pub fn name(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Region => self.region.as_deref(),
            Dimension::Sector => self.sector.as_deref(),
            Dimension::Gender => self.gender.as_deref(),
            Dimension::Status => self.status.as_deref(),
            Dimension::Indicator => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_none()
            && self.sector.is_none()
            && self.gender.is_none()
            && self.years.is_none()
            && self.status.is_none()
    }
}

pub const STAGE_SELECTION: &str = "stage_selection";
pub const ON_APPLY: &str = "on_apply";

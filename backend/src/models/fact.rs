use serde::{Deserialize, Serialize};

/// One observed measurement, already joined against the five dimension tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactRow {
    pub indicator_code: String,
    pub indicator_name: String,
    pub region_code: String,
    pub region_name: String,
    pub sector_code: String,
    pub sector_name: String,
    pub gender_code: String,
    pub gender_name: String,
    pub status_code: String,
    pub status_name: String,
    pub year: i32,
    pub value: f64,
}

/// Descriptive dimensions of a fact row.
///
/// `Region` is backed by the `state` table upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Indicator,
    Region,
    Sector,
    Gender,
    Status,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Indicator,
        Dimension::Region,
        Dimension::Sector,
        Dimension::Gender,
        Dimension::Status,
    ];

    /// Dimensions whose options depend on the selected indicator.
    pub const DEPENDENT: [Dimension; 4] = [
        Dimension::Region,
        Dimension::Sector,
        Dimension::Gender,
        Dimension::Status,
    ];

    /// Descriptive name of this dimension on `row`.
    pub fn name_of<'a>(&self, row: &'a FactRow) -> &'a str {
        match self {
            Dimension::Indicator => &row.indicator_name,
            Dimension::Region => &row.region_name,
            Dimension::Sector => &row.sector_name,
            Dimension::Gender => &row.gender_name,
            Dimension::Status => &row.status_name,
        }
    }

    pub fn code_of<'a>(&self, row: &'a FactRow) -> &'a str {
        match self {
            Dimension::Indicator => &row.indicator_code,
            Dimension::Region => &row.region_code,
            Dimension::Sector => &row.sector_code,
            Dimension::Gender => &row.gender_code,
            Dimension::Status => &row.status_code,
        }
    }

    /// Name of the upstream dimension table.
    pub fn table_name(&self) -> &'static str {
        match self {
            Dimension::Indicator => "indicator",
            Dimension::Region => "state",
            Dimension::Sector => "sector",
            Dimension::Gender => "gender",
            Dimension::Status => "status_code",
        }
    }

    /// Field name used by the selection and the HTTP API.
    pub fn field_name(&self) -> &'static str {
        match self {
            Dimension::Indicator => "indicator",
            Dimension::Region => "region",
            Dimension::Sector => "sector",
            Dimension::Gender => "gender",
            Dimension::Status => "status",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

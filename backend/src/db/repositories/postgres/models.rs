use diesel::prelude::*;
use diesel::sql_types::{Double, Integer, Nullable, Text};

use crate::models::FactRow;

/// One `plfs_fact` row left-joined against the dimension tables.
///
/// Name columns are nullable because a fact may reference a code that is
/// missing from its dimension table.
#[derive(Debug, Clone, QueryableByName)]
pub struct FactJoinRow {
    #[diesel(sql_type = Text)]
    pub indicator_code: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub indicator_name: Option<String>,
    #[diesel(sql_type = Text)]
    pub state_code: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub state_name: Option<String>,
    #[diesel(sql_type = Text)]
    pub sector_code: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub sector_name: Option<String>,
    #[diesel(sql_type = Text)]
    pub gender_code: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub gender_name: Option<String>,
    #[diesel(sql_type = Text)]
    pub status_code: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub status_name: Option<String>,
    #[diesel(sql_type = Integer)]
    pub year: i32,
    #[diesel(sql_type = Double)]
    pub indicator_value: f64,
}

impl FactJoinRow {
    /// Convert into a [`FactRow`], or `None` when any dimension failed to resolve.
    pub fn into_fact_row(self) -> Option<FactRow> {
        Some(FactRow {
            indicator_name: self.indicator_name?,
            region_name: self.state_name?,
            sector_name: self.sector_name?,
            gender_name: self.gender_name?,
            status_name: self.status_name?,
            indicator_code: self.indicator_code,
            region_code: self.state_code,
            sector_code: self.sector_code,
            gender_code: self.gender_code,
            status_code: self.status_code,
            year: self.year,
            value: self.indicator_value,
        })
    }
}

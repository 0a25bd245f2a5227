//! Domain derivation for the cascading selectors.

use log::debug;

use crate::models::{Dataset, DatasetView, Dimension, YearChoice};
use crate::routes::options::{DomainSet, FilterOptions};

fn domains_of(view: &DatasetView<'_>) -> DomainSet {
    let mut year = vec![YearChoice::All];
    year.extend(view.years().into_iter().map(YearChoice::Year));

    DomainSet {
        region: view.project_names(Dimension::Region),
        sector: view.project_names(Dimension::Sector),
        gender: view.project_names(Dimension::Gender),
        year,
        status: view.project_names(Dimension::Status),
    }
}

/// Option lists for the dimensions that depend on `indicator`.
///
/// Values appear in first-occurrence order within the rows of that indicator.
/// An indicator absent from the dataset yields empty lists (the year list then
/// holds only the `"Select All"` sentinel).
pub fn derive_domains(dataset: &Dataset, indicator: &str) -> DomainSet {
    let view = dataset.filter(|row| row.indicator_name == indicator);
    let domains = domains_of(&view);
    debug!(
        "Derived domains for '{}': {} rows, {} regions, {} sectors, {} genders, {} years, {} statuses",
        indicator,
        view.len(),
        domains.region.len(),
        domains.sector.len(),
        domains.gender.len(),
        domains.year.len().saturating_sub(1),
        domains.status.len()
    );
    domains
}

/// Option lists for every selector, projected from the whole dataset.
pub fn initial_options(dataset: &Dataset) -> FilterOptions {
    FilterOptions {
        indicator: dataset.project_names(Dimension::Indicator),
        domains: domains_of(&dataset.view()),
    }
}

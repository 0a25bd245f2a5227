//! In-memory local repository implementation.
//!
//! Holds the fact table and the five dimension tables in their normalized form
//! and performs the join on read, the same way the Postgres store does. It backs
//! unit tests and local development, seeded in code or from a JSON file.

use async_trait::async_trait;
use log::{info, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::db::repository::{ErrorContext, FactRepository, RepositoryError, RepositoryResult};
use crate::models::{Dimension, FactRow};

/// A fact as stored upstream, referencing dimensions by code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFact {
    pub indicator_code: String,
    pub state_code: String,
    pub sector_code: String,
    pub gender_code: String,
    pub status_code: String,
    pub year: i32,
    pub indicator_value: f64,
}

impl RawFact {
    fn code(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Indicator => &self.indicator_code,
            Dimension::Region => &self.state_code,
            Dimension::Sector => &self.sector_code,
            Dimension::Gender => &self.gender_code,
            Dimension::Status => &self.status_code,
        }
    }
}

/// JSON seed file layout: one `code → name` map per dimension table plus the facts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub indicators: HashMap<String, String>,
    #[serde(default)]
    pub states: HashMap<String, String>,
    #[serde(default)]
    pub sectors: HashMap<String, String>,
    #[serde(default)]
    pub genders: HashMap<String, String>,
    #[serde(default)]
    pub statuses: HashMap<String, String>,
    #[serde(default)]
    pub facts: Vec<RawFact>,
}

#[derive(Default)]
struct LocalData {
    dimensions: HashMap<Dimension, HashMap<String, String>>,
    facts: Vec<RawFact>,
    is_healthy: bool,
}

/// In-memory local repository.
///
/// # Example
/// ```
/// use plfs_dashboard::db::repositories::LocalRepository;
/// use plfs_dashboard::models::Dimension;
///
/// let repo = LocalRepository::new();
/// repo.insert_dimension(Dimension::Indicator, "1", "Labour Force Participation Rate (LFPR)");
/// assert_eq!(repo.fact_count(), 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                is_healthy: true,
                ..Default::default()
            })),
        }
    }

    /// Build a repository whose tables reproduce already-joined rows.
    pub fn from_rows(rows: &[FactRow]) -> Self {
        let repo = Self::new();
        for row in rows {
            for dimension in Dimension::ALL {
                repo.insert_dimension(dimension, dimension.code_of(row), dimension.name_of(row));
            }
            repo.insert_fact(RawFact {
                indicator_code: row.indicator_code.clone(),
                state_code: row.region_code.clone(),
                sector_code: row.sector_code.clone(),
                gender_code: row.gender_code.clone(),
                status_code: row.status_code.clone(),
                year: row.year,
                indicator_value: row.value,
            });
        }
        repo
    }

    pub fn from_seed(seed: SeedData) -> Self {
        let repo = Self::new();
        {
            let mut data = repo.data.write();
            data.dimensions.insert(Dimension::Indicator, seed.indicators);
            data.dimensions.insert(Dimension::Region, seed.states);
            data.dimensions.insert(Dimension::Sector, seed.sectors);
            data.dimensions.insert(Dimension::Gender, seed.genders);
            data.dimensions.insert(Dimension::Status, seed.statuses);
            data.facts = seed.facts;
        }
        repo
    }

    pub fn from_json_str(json: &str) -> RepositoryResult<Self> {
        let seed: SeedData = serde_json::from_str(json)?;
        Ok(Self::from_seed(seed))
    }

    /// Load a JSON seed file (see [`SeedData`]).
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read seed file {}: {}",
                path.display(),
                e
            ))
            .with_operation("from_json_file")
        })?;
        let repo = Self::from_json_str(&content).map_err(|e| e.with_operation("from_json_file"))?;
        info!("Seeded local repository with {} facts from {}", repo.fact_count(), path.display());
        Ok(repo)
    }

    /// Add or replace a dimension table entry.
    pub fn insert_dimension(&self, dimension: Dimension, code: &str, name: &str) {
        self.data
            .write()
            .dimensions
            .entry(dimension)
            .or_default()
            .insert(code.to_string(), name.to_string());
    }

    /// Append a fact; insertion order is the read order.
    pub fn insert_fact(&self, fact: RawFact) {
        self.data.write().facts.push(fact);
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    pub fn fact_count(&self) -> usize {
        self.data.read().facts.len()
    }

    fn ensure_healthy(&self, operation: &str) -> RepositoryResult<()> {
        if self.data.read().is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection_with_context(
                "Local repository is unavailable",
                ErrorContext::new(operation),
            ))
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FactRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn count_dimension(&self, dimension: Dimension) -> RepositoryResult<usize> {
        self.ensure_healthy("count_dimension")?;
        Ok(self
            .data
            .read()
            .dimensions
            .get(&dimension)
            .map_or(0, HashMap::len))
    }

    async fn fetch_fact_rows(&self) -> RepositoryResult<Vec<FactRow>> {
        self.ensure_healthy("fetch_fact_rows")?;
        let data = self.data.read();
        let empty = HashMap::new();
        let name = |dimension: Dimension, fact: &RawFact| -> Option<String> {
            data.dimensions
                .get(&dimension)
                .unwrap_or(&empty)
                .get(fact.code(dimension))
                .cloned()
        };

        let mut rows = Vec::with_capacity(data.facts.len());
        let mut unresolved = 0usize;
        for fact in &data.facts {
            let joined = (
                name(Dimension::Indicator, fact),
                name(Dimension::Region, fact),
                name(Dimension::Sector, fact),
                name(Dimension::Gender, fact),
                name(Dimension::Status, fact),
            );
            match joined {
                (Some(indicator), Some(region), Some(sector), Some(gender), Some(status)) => {
                    rows.push(FactRow {
                        indicator_code: fact.indicator_code.clone(),
                        indicator_name: indicator,
                        region_code: fact.state_code.clone(),
                        region_name: region,
                        sector_code: fact.sector_code.clone(),
                        sector_name: sector,
                        gender_code: fact.gender_code.clone(),
                        gender_name: gender,
                        status_code: fact.status_code.clone(),
                        status_name: status,
                        year: fact.year,
                        value: fact.indicator_value,
                    })
                }
                _ => unresolved += 1,
            }
        }

        if unresolved > 0 {
            warn!("Dropped {} fact rows with unresolved dimension codes", unresolved);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> LocalRepository {
        let repo = LocalRepository::new();
        repo.insert_dimension(Dimension::Indicator, "1", "LFPR");
        repo.insert_dimension(Dimension::Region, "99", "All India");
        repo.insert_dimension(Dimension::Sector, "3", "Rural + Urban");
        repo.insert_dimension(Dimension::Gender, "3", "person");
        repo.insert_dimension(Dimension::Status, "1", "Usual Status (ps+ss)");
        repo
    }

    fn raw(state: &str, year: i32, value: f64) -> RawFact {
        RawFact {
            indicator_code: "1".into(),
            state_code: state.into(),
            sector_code: "3".into(),
            gender_code: "3".into(),
            status_code: "1".into(),
            year,
            indicator_value: value,
        }
    }

    #[tokio::test]
    async fn test_join_resolves_names_in_insertion_order() {
        let repo = seeded();
        repo.insert_fact(raw("99", 2020, 53.5));
        repo.insert_fact(raw("99", 2019, 50.2));

        let rows = repo.fetch_fact_rows().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].year, 2020);
        assert_eq!(rows[0].region_name, "All India");
        assert_eq!(rows[1].value, 50.2);
    }

    #[tokio::test]
    async fn test_unresolved_codes_are_dropped() {
        let repo = seeded();
        repo.insert_fact(raw("99", 2019, 50.2));
        repo.insert_fact(raw("42", 2019, 12.0));

        let rows = repo.fetch_fact_rows().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(repo.fact_count(), 2);
    }

    #[tokio::test]
    async fn test_count_dimension() {
        let repo = seeded();
        repo.insert_dimension(Dimension::Region, "32", "Kerala");
        assert_eq!(repo.count_dimension(Dimension::Region).await.unwrap(), 2);
        assert_eq!(repo.count_dimension(Dimension::Gender).await.unwrap(), 1);
        assert_eq!(
            LocalRepository::new().count_dimension(Dimension::Status).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_unhealthy_repository_fails_reads() {
        let repo = seeded();
        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        let err = repo.fetch_fact_rows().await.unwrap_err();
        assert!(matches!(err, RepositoryError::ConnectionError { .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_from_rows_round_trips_join() {
        let source = seeded();
        source.insert_fact(raw("99", 2019, 50.2));
        let rows = source.fetch_fact_rows().await.unwrap();

        let rebuilt = LocalRepository::from_rows(&rows);
        assert_eq!(rebuilt.fetch_fact_rows().await.unwrap(), rows);
    }

    #[tokio::test]
    async fn test_from_json_str() {
        let json = r#"{
            "indicators": {"1": "LFPR"},
            "states": {"99": "All India"},
            "sectors": {"3": "Rural + Urban"},
            "genders": {"3": "person"},
            "statuses": {"1": "Usual Status (ps+ss)"},
            "facts": [
                {"indicator_code": "1", "state_code": "99", "sector_code": "3",
                 "gender_code": "3", "status_code": "1", "year": 2019, "indicator_value": 50.2}
            ]
        }"#;
        let repo = LocalRepository::from_json_str(json).unwrap();
        let rows = repo.fetch_fact_rows().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].indicator_name, "LFPR");
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = LocalRepository::from_json_file("/nonexistent/seed.json").err().unwrap();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    }

    #[test]
    fn test_clear_keeps_health_flag() {
        let repo = seeded();
        repo.insert_fact(raw("99", 2019, 50.2));
        repo.set_healthy(false);
        repo.clear();
        assert_eq!(repo.fact_count(), 0);
        assert!(!repo.data.read().is_healthy);
    }
}

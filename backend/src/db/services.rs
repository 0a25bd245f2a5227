//! Service layer over [`FactRepository`].
//!
//! These functions work with any repository implementation and translate
//! repository failures into the dashboard error taxonomy.

use log::{debug, error, info};

use super::repository::{FactRepository, RepositoryError};
use crate::error::{DashboardError, DashboardResult};
use crate::models::{Dataset, Dimension};

fn unavailable(err: RepositoryError) -> DashboardError {
    error!("Dataset load failed: {}", err);
    DashboardError::DataUnavailable(err.to_string())
}

/// Check that the backing store is reachable.
pub async fn health_check(repo: &dyn FactRepository) -> Result<bool, RepositoryError> {
    repo.health_check().await
}

/// Read the joined fact table into an immutable [`Dataset`].
///
/// Every dimension table must be non-empty and the join must yield at least
/// one row; otherwise the load fails with [`DashboardError::DataUnavailable`].
pub async fn load_dataset(repo: &dyn FactRepository) -> DashboardResult<Dataset> {
    for dimension in Dimension::ALL {
        let count = repo.count_dimension(dimension).await.map_err(unavailable)?;
        debug!("Dimension table '{}' has {} entries", dimension.table_name(), count);
        if count == 0 {
            return Err(DashboardError::DataUnavailable(format!(
                "dimension table '{}' is empty",
                dimension.table_name()
            )));
        }
    }

    let rows = repo.fetch_fact_rows().await.map_err(unavailable)?;
    if rows.is_empty() {
        return Err(DashboardError::DataUnavailable(
            "fact table returned no rows".to_string(),
        ));
    }

    let dataset = Dataset::new(rows);
    info!(
        "Loaded PLFS dataset: {} rows, fingerprint {}",
        dataset.len(),
        dataset.fingerprint()
    );
    Ok(dataset)
}

//! Read-only access to the labour-survey fact table.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Dimension, FactRow};

/// Repository trait for the fact table and its dimension tables.
///
/// The store is only read once, at startup: a count of each dimension table
/// and one bulk read of the joined fact rows.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait FactRepository: Send + Sync {
    /// Check that the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Number of entries in the dimension table backing `dimension`.
    async fn count_dimension(&self, dimension: Dimension) -> RepositoryResult<usize>;

    /// All fact rows left-joined against the dimension tables, in store order.
    ///
    /// Rows whose codes do not resolve to a descriptive name are omitted.
    async fn fetch_fact_rows(&self) -> RepositoryResult<Vec<FactRow>>;
}

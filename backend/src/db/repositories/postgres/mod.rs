//! Postgres repository implementation using Diesel.
//!
//! Reads the normalized PLFS warehouse: the `plfs_fact` table joined against
//! the `indicator`, `state`, `sector`, `gender` and `status_code` dimension
//! tables. Each dimension table keys on `<dimension>_code` and labels with
//! `<dimension>_name`. The dashboard never writes, so no migrations are shipped.
//!
//! Connection settings come from the `[postgres]` table of the dashboard
//! configuration (see [`crate::config::PostgresSettings`]).

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use log::warn;
use std::time::Duration;
use tokio::task;

use crate::db::repository::{ErrorContext, FactRepository, RepositoryError, RepositoryResult};
use crate::models::{Dimension, FactRow};

mod models;
mod schema;

use models::FactJoinRow;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const FACT_JOIN_QUERY: &str = r#"
SELECT
    f.indicator_code,
    i.indicator_name AS indicator_name,
    f.state_code,
    s.state_name AS state_name,
    f.sector_code,
    sec.sector_name AS sector_name,
    f.gender_code,
    g.gender_name AS gender_name,
    f.status_code,
    st.status_name AS status_name,
    f.year,
    f.indicator_value
FROM plfs_fact f
LEFT JOIN indicator i ON f.indicator_code = i.indicator_code
LEFT JOIN "state" s ON f.state_code = s.state_code
LEFT JOIN sector sec ON f.sector_code = sec.sector_code
LEFT JOIN gender g ON f.gender_code = g.gender_code
LEFT JOIN status_code st ON f.status_code = st.status_code
"#;

/// Pool and retry settings for [`PostgresRepository`].
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connection_timeout_sec: u64,
    pub idle_timeout_sec: u64,
    /// Retries after the first attempt, for connection faults only.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    retries: u32,
    initial_delay: Duration,
}

impl RetryPolicy {
    fn delay(&self, retry: u32) -> Duration {
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(retry.min(16)))
    }
}

/// Diesel-backed read-only repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    retry: RetryPolicy,
}

impl PostgresRepository {
    /// Create a new repository backed by a connection pool.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        Ok(Self {
            pool,
            retry: RetryPolicy {
                retries: config.max_retries,
                initial_delay: Duration::from_millis(config.retry_delay_ms),
            },
        })
    }

    /// Run `query` on a pooled connection off the async runtime.
    ///
    /// Retryable failures (pool checkout, closed connections) are retried with
    /// exponential backoff; everything else is returned on the first attempt.
    async fn with_conn<T, F>(&self, operation: &'static str, query: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: Fn(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let policy = self.retry;

        task::spawn_blocking(move || {
            let mut retry = 0;
            loop {
                let outcome = pool
                    .get()
                    .map_err(RepositoryError::from)
                    .and_then(|mut conn| query(&mut conn))
                    .map_err(|e| e.with_operation(operation));
                match outcome {
                    Err(err) if err.is_retryable() && retry < policy.retries => {
                        let delay = policy.delay(retry);
                        warn!("{} failed, retrying in {:?}: {}", operation, delay, err);
                        std::thread::sleep(delay);
                        retry += 1;
                    }
                    other => return other,
                }
            }
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new(operation),
            )
        })?
    }
}

fn count_table(conn: &mut PgConnection, dimension: Dimension) -> QueryResult<i64> {
    use schema::{gender, indicator, sector, states, statuses};

    match dimension {
        Dimension::Indicator => indicator::table.count().get_result(conn),
        Dimension::Region => states::table.count().get_result(conn),
        Dimension::Sector => sector::table.count().get_result(conn),
        Dimension::Gender => gender::table.count().get_result(conn),
        Dimension::Status => statuses::table.count().get_result(conn),
    }
}

#[async_trait]
impl FactRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn count_dimension(&self, dimension: Dimension) -> RepositoryResult<usize> {
        self.with_conn("count_dimension", move |conn| {
            let count = count_table(conn, dimension)
                .map_err(|e| RepositoryError::from(e).with_table(dimension.table_name()))?;
            Ok(usize::try_from(count).unwrap_or_default())
        })
        .await
    }

    async fn fetch_fact_rows(&self) -> RepositoryResult<Vec<FactRow>> {
        let joined: Vec<FactJoinRow> = self
            .with_conn("fetch_fact_rows", |conn| {
                sql_query(FACT_JOIN_QUERY)
                    .load::<FactJoinRow>(conn)
                    .map_err(|e| RepositoryError::from(e).with_table("plfs_fact"))
            })
            .await?;

        let total = joined.len();
        let rows: Vec<FactRow> = joined
            .into_iter()
            .filter_map(FactJoinRow::into_fact_row)
            .collect();
        if rows.len() < total {
            warn!(
                "Dropped {} fact rows with unresolved dimension codes",
                total - rows.len()
            );
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_uses_prefixed_dimension_columns() {
        for (alias, dimension) in [
            ("i", "indicator"),
            ("s", "state"),
            ("sec", "sector"),
            ("g", "gender"),
            ("st", "status"),
        ] {
            assert!(FACT_JOIN_QUERY.contains(&format!(
                "f.{dimension}_code = {alias}.{dimension}_code"
            )));
            assert!(FACT_JOIN_QUERY.contains(&format!(
                "{alias}.{dimension}_name AS {dimension}_name"
            )));
        }
        assert!(!FACT_JOIN_QUERY.contains(".code"));
        assert!(!FACT_JOIN_QUERY.contains(".name"));
    }

    #[test]
    fn test_retry_delay_doubles() {
        let policy = RetryPolicy {
            retries: 3,
            initial_delay: Duration::from_millis(100),
        };
        assert_eq!(policy.delay(0), Duration::from_millis(100));
        assert_eq!(policy.delay(1), Duration::from_millis(200));
        assert_eq!(policy.delay(2), Duration::from_millis(400));
    }
}

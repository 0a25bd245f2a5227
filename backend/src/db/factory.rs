//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use log::info;

use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::PostgresRepository;
use super::repository::{FactRepository, RepositoryError, RepositoryResult};
use crate::config::DashboardConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres + Diesel implementation
    Postgres,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Defaults to Postgres if a database URL is
    /// present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("DATABASE_URL").is_ok() || std::env::var("PG_DATABASE_URL").is_ok() {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create the repository a dashboard configuration asks for.
    ///
    /// A local repository is seeded from `repository.seed_file` when set and
    /// starts empty otherwise.
    pub async fn from_config(config: &DashboardConfig) -> RepositoryResult<Arc<dyn FactRepository>> {
        match config.repository_type()? {
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let pg_config = config.to_postgres_config()?.ok_or_else(|| {
                        RepositoryError::configuration(
                            "Postgres repository requires database configuration",
                        )
                    })?;
                    let pg = Self::create_postgres(&pg_config).await?;
                    Ok(pg as Arc<dyn FactRepository>)
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "Postgres repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => match &config.repository.seed_file {
                Some(path) => {
                    let repo = LocalRepository::from_json_file(path)?;
                    Ok(Arc::new(repo) as Arc<dyn FactRepository>)
                }
                None => {
                    info!("No seed file configured, local repository starts empty");
                    Ok(Self::create_local())
                }
            },
        }
    }

    /// Create a Postgres repository.
    #[cfg(feature = "postgres-repo")]
    pub async fn create_postgres(
        config: &super::PostgresConfig,
    ) -> RepositoryResult<Arc<PostgresRepository>> {
        let repo = PostgresRepository::new(config.clone())?;
        Ok(Arc::new(repo))
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn FactRepository> {
        Arc::new(LocalRepository::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Dimension;
    use std::io::Write;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!(
            RepositoryType::from_str("local").unwrap(),
            RepositoryType::Local
        );
        assert_eq!(
            RepositoryType::from_str("postgres").unwrap(),
            RepositoryType::Postgres
        );
        assert_eq!(
            RepositoryType::from_str("Pg").unwrap(),
            RepositoryType::Postgres
        );
        assert!(RepositoryType::from_str("invalid").is_err());
    }

    #[tokio::test]
    async fn test_create_local_repository() {
        let repo = RepositoryFactory::create_local();
        assert!(repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_from_config_seeds_local_repository() {
        let mut seed = tempfile::NamedTempFile::new().unwrap();
        write!(
            seed,
            r#"{{"indicators": {{"1": "LFPR"}}, "states": {{"99": "All India"}}}}"#
        )
        .unwrap();

        let mut config = DashboardConfig::default();
        config.repository.seed_file = Some(seed.path().to_path_buf());

        let repo = RepositoryFactory::from_config(&config).await.unwrap();
        assert_eq!(repo.count_dimension(Dimension::Indicator).await.unwrap(), 1);
        assert_eq!(repo.count_dimension(Dimension::Sector).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_from_config_missing_seed_file() {
        let mut config = DashboardConfig::default();
        config.repository.seed_file = Some("/nonexistent/plfs.json".into());
        assert!(RepositoryFactory::from_config(&config).await.is_err());
    }

    #[cfg(not(feature = "postgres-repo"))]
    #[tokio::test]
    async fn test_postgres_requires_feature() {
        let mut config = DashboardConfig::default();
        config.repository.repo_type = "postgres".to_string();
        let err = RepositoryFactory::from_config(&config).await.err().unwrap();
        assert!(err.to_string().contains("not enabled"));
    }
}

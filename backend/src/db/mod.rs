//! Database module for PLFS fact data.
//!
//! This module provides abstractions for database operations via the Repository pattern,
//! allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Dashboard services / REST API                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                             │
//! │  - Dataset loading and validation                        │
//! │  - Repository errors → DataUnavailable                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │  Postgres       │   Local     │
//!     │  (diesel/r2d2)  │ (in-memory) │
//!     └──────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```ignore
//! use plfs_dashboard::config::DashboardConfig;
//! use plfs_dashboard::db::{services, RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DashboardConfig::load()?;
//!     let repo = RepositoryFactory::from_config(&config).await?;
//!     let dataset = services::load_dataset(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod checksum;
pub mod factory;
pub mod repositories;
pub mod repository;
pub mod services;


#[cfg(feature = "postgres-repo")]
pub use repositories::{PostgresConfig, PostgresRepository};

pub use checksum::dataset_fingerprint;
pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{ErrorContext, FactRepository, RepositoryError, RepositoryResult};
pub use services::{health_check, load_dataset};

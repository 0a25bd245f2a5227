//! Repository implementations module.
//!
//! This module contains the implementations of the `FactRepository` trait:
//! - `postgres`: PostgreSQL reader with Diesel ORM
//! - `local`: In-memory implementation for unit testing and local development
pub mod local;
#[cfg(feature = "postgres-repo")]
pub mod postgres;

pub use local::{LocalRepository, RawFact, SeedData};
#[cfg(feature = "postgres-repo")]
pub use postgres::{PostgresConfig, PostgresRepository};

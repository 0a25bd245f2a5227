//! Repository traits and error types.

pub mod error;
pub mod facts;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use facts::FactRepository;

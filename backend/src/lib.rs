//! # PLFS Dashboard Backend
//!
//! Filter-and-projection engine behind the Periodic Labour Force Survey dashboard.
//!
//! The PLFS fact table is loaded once from the upstream store into an immutable
//! [`models::Dataset`]. Every selector change is answered by pure functions over
//! that dataset: the option lists that remain valid for an indicator, and the
//! year/value series a complete selection resolves to. A per-session controller
//! gates rendering behind explicit triggers and exports the last rendered chart
//! as an SVG document.
//!
//! ## Architecture
//!
//! - [`api`]: Data Transfer Objects exchanged with the presentation layer
//! - [`db`]: Repository pattern over the fact and dimension tables, dataset loading
//! - [`services`]: Domain derivation, selection resolution, charting, sessions
//! - [`routes`]: Screen-level DTO definitions
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

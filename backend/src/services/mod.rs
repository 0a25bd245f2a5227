//! Service layer: the filter-and-projection engine behind the dashboard.
//!
//! These functions are pure over an immutable [`Dataset`](crate::models::Dataset)
//! and can run concurrently across sessions without locking. The
//! [`controller`] adds the per-session render gating on top of them.

pub mod chart;
pub mod controller;
pub mod domains;
pub mod export;
pub mod resolver;
pub mod session_store;


pub use chart::{render, ChartStyle};
pub use controller::{DashboardSession, RenderTrigger, SessionPhase, SessionSettings};
pub use domains::{derive_domains, initial_options};
pub use export::{export_chart, ImageRenderer, SvgRenderer};
pub use resolver::{effective_years, resolve, resolve_with_order};
pub use session_store::{SessionInfo, SessionStore};

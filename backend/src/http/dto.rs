//! Data Transfer Objects for the HTTP API.
//!
//! Screen-level DTOs are re-exported from the routes module since they
//! already derive Serialize/Deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::api::{
    ChartSpec, DomainSet, FilterOptions, ImageFormat, ResolvedSeries, SelectionState,
    SelectionUpdate,
};
use crate::services::controller::{RenderTrigger, SessionPhase};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Store connectivity as last observed
    pub database: String,
    /// Rows in the loaded dataset
    pub rows: usize,
    pub fingerprint: String,
    pub sessions: usize,
}

/// Query parameters for `GET /v1/domains`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainsQuery {
    pub indicator: String,
}

/// Query parameters for the export endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: Option<String>,
}

/// Request body for `PUT /v1/sessions/{id}/indicator`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorRequest {
    pub indicator: String,
}

/// Stateless resolution result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub series: ResolvedSeries,
    pub chart: ChartSpec,
}

/// Response for session creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub options: FilterOptions,
    pub selection: SelectionState,
}

/// Current state of a dashboard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub phase: SessionPhase,
    pub selection: SelectionState,
    pub domains: Option<DomainSet>,
    pub last_trigger: Option<RenderTrigger>,
    pub apply_count: u64,
    pub rendered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

/// Result of the one-shot initial-load trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialLoadResponse {
    /// False when the trigger had already fired for this session
    pub rendered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
}

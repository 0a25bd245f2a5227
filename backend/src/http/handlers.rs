//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{debug, info};

use super::dto::{
    ChartSpec, CreateSessionResponse, DomainSet, DomainsQuery, ExportQuery, FilterOptions,
    HealthResponse, ImageFormat, IndicatorRequest, InitialLoadResponse, ResolveResponse,
    SelectionState, SelectionUpdate, SessionSnapshot,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::error::DashboardError;
use crate::services::{chart, domains, resolver};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
        rows: state.dataset().len(),
        fingerprint: state.dataset().fingerprint().to_string(),
        sessions: state.sessions.len(),
    }))
}

// =============================================================================
// Stateless queries
// =============================================================================

/// GET /v1/options
pub async fn get_initial_options(State(state): State<AppState>) -> HandlerResult<FilterOptions> {
    Ok(Json(domains::initial_options(state.dataset())))
}

/// GET /v1/domains?indicator=...
///
/// An indicator absent from the dataset yields empty lists, not an error.
pub async fn get_domains(
    State(state): State<AppState>,
    Query(query): Query<DomainsQuery>,
) -> HandlerResult<DomainSet> {
    Ok(Json(domains::derive_domains(state.dataset(), &query.indicator)))
}

/// POST /v1/resolve
///
/// Resolve and render a complete selection without touching any session.
pub async fn resolve_selection(
    State(state): State<AppState>,
    Json(selection): Json<SelectionState>,
) -> HandlerResult<ResolveResponse> {
    let settings = state.settings();
    let series = resolver::resolve_with_order(state.dataset(), &selection, settings.order);
    let chart = chart::render(&series, &settings.style);
    Ok(Json(ResolveResponse { series, chart }))
}

// =============================================================================
// Sessions
// =============================================================================

/// POST /v1/sessions
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), AppError> {
    let session_id = state.sessions.create_session();
    let (options, selection) = state
        .sessions
        .with_session(&session_id, |s| (s.initial_options(), s.selection().clone()))
        .ok_or_else(|| AppError::Internal("Session vanished after creation".to_string()))?;
    info!(session_id = %session_id, "Created dashboard session");

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            options,
            selection,
        }),
    ))
}

/// GET /v1/sessions/{session_id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> HandlerResult<SessionSnapshot> {
    let info = state
        .sessions
        .info(&session_id)
        .ok_or_else(|| AppError::session_not_found(&session_id))?;
    let snapshot = state
        .sessions
        .with_session(&session_id, |s| SessionSnapshot {
            session_id: info.session_id.clone(),
            phase: s.phase(),
            selection: s.selection().clone(),
            domains: s.domains().cloned(),
            last_trigger: s.last_trigger(),
            apply_count: s.apply_count(),
            rendered_at: s.rendered_at(),
            created_at: info.created_at,
            last_used_at: info.last_used_at,
        })
        .ok_or_else(|| AppError::session_not_found(&session_id))?;
    Ok(Json(snapshot))
}

/// DELETE /v1/sessions/{session_id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove_session(&session_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::session_not_found(&session_id))
    }
}

/// PUT /v1/sessions/{session_id}/indicator
pub async fn change_indicator(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<IndicatorRequest>,
) -> HandlerResult<DomainSet> {
    let domains = state
        .sessions
        .with_session(&session_id, |s| s.on_indicator_change(&request.indicator))
        .ok_or_else(|| AppError::session_not_found(&session_id))??;
    Ok(Json(domains))
}

/// PATCH /v1/sessions/{session_id}/selection
///
/// Stage a partial update. Never renders.
pub async fn stage_selection(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(update): Json<SelectionUpdate>,
) -> HandlerResult<SelectionState> {
    let selection = state
        .sessions
        .with_session(&session_id, |s| s.stage(&update).cloned())
        .ok_or_else(|| AppError::session_not_found(&session_id))??;
    debug!(session_id = %session_id, "Staged selection update");
    Ok(Json(selection))
}

/// POST /v1/sessions/{session_id}/initial-load
pub async fn initial_load(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> HandlerResult<InitialLoadResponse> {
    let chart = state
        .sessions
        .with_session(&session_id, |s| s.on_initial_load())
        .ok_or_else(|| AppError::session_not_found(&session_id))?;
    Ok(Json(InitialLoadResponse {
        rendered: chart.is_some(),
        chart,
    }))
}

/// POST /v1/sessions/{session_id}/apply
pub async fn apply_selection(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> HandlerResult<ChartSpec> {
    let chart = state
        .sessions
        .with_session(&session_id, |s| s.on_apply())
        .ok_or_else(|| AppError::session_not_found(&session_id))?;
    Ok(Json(chart))
}

/// GET /v1/sessions/{session_id}/chart
pub async fn get_chart(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> HandlerResult<ChartSpec> {
    let chart = state
        .sessions
        .with_session(&session_id, |s| s.last_chart().cloned())
        .ok_or_else(|| AppError::session_not_found(&session_id))?
        .ok_or(DashboardError::NoChartToExport)?;
    Ok(Json(chart))
}

/// GET /v1/sessions/{session_id}/export?format=svg
///
/// Serializes the last rendered chart as a file download.
pub async fn export_chart(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let format = match query.format.as_deref() {
        Some(raw) => raw.parse::<ImageFormat>().map_err(AppError::BadRequest)?,
        None => ImageFormat::default(),
    };

    let sessions = state.sessions.clone();
    let id = session_id.clone();
    let image = tokio::task::spawn_blocking(move || {
        sessions.with_session(&id, |s| s.on_export(format))
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
    .ok_or_else(|| AppError::session_not_found(&session_id))??;

    let disposition = format!("attachment; filename=\"{}\"", image.filename);
    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        image.bytes,
    ))
}

//! Per-session gating state machine.
//!
//! A session stages selector changes and only renders on an explicit trigger:
//! the one-shot initial load, or an Apply activation. Export always serializes
//! the last rendered chart, never the staged selection.
//!
//! ```text
//! Idle ──indicator──▶ DomainsStale ──derive──▶ DomainsFresh ──apply──▶ Resolving ──▶ Rendered
//!                                                   ▲                                  │
//!                                                   └────────────indicator─────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::models::{Dataset, Dimension, YearChoice};
use crate::routes::chart::{ChartSpec, SeriesOrder};
use crate::routes::export::{ExportedImage, ImageFormat};
use crate::routes::options::{DomainSet, FilterOptions};
use crate::routes::selection::{SelectionState, SelectionUpdate};

use super::chart::{render, ChartStyle};
use super::domains::{derive_domains, initial_options};
use super::export::{export_chart, ImageRenderer};
use super::resolver::resolve_with_order;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    DomainsStale,
    DomainsFresh,
    Resolving,
    Rendered,
}

/// What caused a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderTrigger {
    InitialLoad,
    Apply,
}

/// Settings shared by every session of a deployment.
#[derive(Clone)]
pub struct SessionSettings {
    pub defaults: SelectionState,
    pub style: ChartStyle,
    pub order: SeriesOrder,
    pub renderer: Arc<dyn ImageRenderer>,
}

/// One user's interaction stream over the shared dataset.
pub struct DashboardSession {
    dataset: Arc<Dataset>,
    settings: SessionSettings,
    phase: SessionPhase,
    staged: SelectionState,
    domains: Option<DomainSet>,
    last_chart: Option<ChartSpec>,
    last_trigger: Option<RenderTrigger>,
    initial_load_done: bool,
    apply_count: u64,
    rendered_at: Option<DateTime<Utc>>,
}

impl DashboardSession {
    /// Start a session with the configured default selection staged.
    ///
    /// Domains are derived for the default indicator up front so staged values
    /// are validated from the first change. The defaults themselves are kept
    /// as configured, even when they fall outside those domains.
    pub fn new(dataset: Arc<Dataset>, settings: SessionSettings) -> Self {
        let staged = settings.defaults.clone();
        let domains = derive_domains(&dataset, &staged.indicator);
        if let Some(dimension) = domains.first_empty() {
            warn!(
                "Default indicator '{}' has no {} options",
                staged.indicator, dimension
            );
        }
        Self {
            dataset,
            settings,
            phase: SessionPhase::Idle,
            staged,
            domains: Some(domains),
            last_chart: None,
            last_trigger: None,
            initial_load_done: false,
            apply_count: 0,
            rendered_at: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn selection(&self) -> &SelectionState {
        &self.staged
    }

    /// Domains of the staged indicator.
    pub fn domains(&self) -> Option<&DomainSet> {
        self.domains.as_ref()
    }

    pub fn last_chart(&self) -> Option<&ChartSpec> {
        self.last_chart.as_ref()
    }

    pub fn last_trigger(&self) -> Option<RenderTrigger> {
        self.last_trigger
    }

    pub fn apply_count(&self) -> u64 {
        self.apply_count
    }

    pub fn rendered_at(&self) -> Option<DateTime<Utc>> {
        self.rendered_at
    }

    /// Option lists for every selector, from the unfiltered dataset.
    pub fn initial_options(&self) -> FilterOptions {
        initial_options(&self.dataset)
    }

    /// Re-derive dependent domains for `indicator` and re-seed the staged selection.
    ///
    /// Each dependent field takes the first option of its new domain; years reset
    /// to the `"Select All"` sentinel. When a domain is empty the domains are still
    /// recorded and `NoValidSelection` names the first empty dimension.
    pub fn on_indicator_change(&mut self, indicator: &str) -> DashboardResult<DomainSet> {
        self.phase = SessionPhase::DomainsStale;
        self.staged.indicator = indicator.to_string();

        let domains = derive_domains(&self.dataset, indicator);
        self.phase = SessionPhase::DomainsFresh;
        self.domains = Some(domains.clone());

        if let Some(dimension) = domains.first_empty() {
            warn!("Indicator '{}' has no {} options", indicator, dimension);
            return Err(DashboardError::NoValidSelection {
                indicator: indicator.to_string(),
                dimension,
            });
        }

        for dimension in Dimension::DEPENDENT {
            if let Some(first) = domains.names(dimension).first() {
                self.staged.set_name(dimension, first.clone());
            }
        }
        self.staged.years = vec![YearChoice::All];

        debug!("Re-seeded selection for '{}': {:?}", indicator, self.staged);
        Ok(domains)
    }

    /// Apply a partial selector change without rendering.
    ///
    /// Values are checked against the fresh domains of the current indicator.
    /// On error the staged selection is left unchanged.
    pub fn stage(&mut self, update: &SelectionUpdate) -> DashboardResult<&SelectionState> {
        if let Some(domains) = &self.domains {
            for dimension in Dimension::DEPENDENT {
                if let Some(value) = update.name(dimension) {
                    if !domains.names(dimension).iter().any(|v| v == value) {
                        return Err(DashboardError::unknown_option(dimension.field_name(), value));
                    }
                }
            }
            if let Some(years) = &update.years {
                if let Some(bad) = years.iter().find(|y| !domains.year.contains(y)) {
                    return Err(DashboardError::unknown_option("years", bad));
                }
            }
        }
        if let Some(years) = &update.years {
            if years.is_empty() {
                return Err(DashboardError::unknown_option("years", "[]"));
            }
        }

        for dimension in Dimension::DEPENDENT {
            if let Some(value) = update.name(dimension) {
                self.staged.set_name(dimension, value);
            }
        }
        if let Some(years) = &update.years {
            self.staged.years = years.clone();
        }
        Ok(&self.staged)
    }

    /// The one-shot render at session start. Returns `None` on every later call.
    pub fn on_initial_load(&mut self) -> Option<ChartSpec> {
        if self.initial_load_done {
            return None;
        }
        self.initial_load_done = true;
        Some(self.commit(RenderTrigger::InitialLoad))
    }

    /// Commit the staged selection and render it.
    pub fn on_apply(&mut self) -> ChartSpec {
        self.apply_count += 1;
        self.commit(RenderTrigger::Apply)
    }

    /// Serialize the last rendered chart.
    pub fn on_export(&self, format: ImageFormat) -> DashboardResult<ExportedImage> {
        let chart = self.last_chart.as_ref().ok_or(DashboardError::NoChartToExport)?;
        export_chart(self.settings.renderer.as_ref(), chart, format)
    }

    fn commit(&mut self, trigger: RenderTrigger) -> ChartSpec {
        self.phase = SessionPhase::Resolving;
        let series = resolve_with_order(&self.dataset, &self.staged, self.settings.order);
        let chart = render(&series, &self.settings.style);
        info!(
            "Rendered chart on {:?} for '{}' with {} points",
            trigger,
            self.staged.indicator,
            series.len()
        );

        self.last_chart = Some(chart.clone());
        self.last_trigger = Some(trigger);
        self.rendered_at = Some(Utc::now());
        self.phase = SessionPhase::Rendered;
        chart
    }
}

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use plfs_dashboard::db::repositories::{LocalRepository, RawFact};
use plfs_dashboard::models::{Dataset, Dimension, FactRow};
use plfs_dashboard::routes::chart::SeriesOrder;
use plfs_dashboard::routes::selection::SelectionState;
use plfs_dashboard::services::chart::ChartStyle;
use plfs_dashboard::services::controller::SessionSettings;
use plfs_dashboard::services::export::SvgRenderer;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores variables on unwind and serializes access to process-global env vars.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub const LFPR: &str = "Labour Force Participation Rate (LFPR)";
pub const WPR: &str = "Worker Population Ratio (WPR)";
pub const UR: &str = "Unemployment Rate (UR)";
pub const USUAL: &str = "Usual Status (ps+ss)";
pub const CWS: &str = "Current Weekly Status (CWS)";

pub const INDICATORS: [(&str, &str); 3] = [("1", LFPR), ("2", WPR), ("3", UR)];
pub const STATES: [(&str, &str); 3] = [("99", "All India"), ("32", "Kerala"), ("10", "Bihar")];
pub const SECTORS: [(&str, &str); 3] = [("1", "Rural"), ("2", "Urban"), ("3", "Rural + Urban")];
pub const GENDERS: [(&str, &str); 3] = [("1", "male"), ("2", "female"), ("3", "person")];
pub const STATUSES: [(&str, &str); 2] = [("1", USUAL), ("2", CWS)];

/// Whether the fixture warehouse holds a fact for this combination.
///
/// Coverage is uneven so that domains differ per indicator:
/// Bihar only reports LFPR, UR is only published for "Rural + Urban" from 2019,
/// and weekly-status figures start in 2018.
fn published(indicator: &str, state: &str, sector: &str, status: &str, year: i32) -> bool {
    if state == "10" && indicator != "1" {
        return false;
    }
    if indicator == "3" && (sector != "3" || year < 2019) {
        return false;
    }
    !(status == "2" && year < 2018)
}

fn value_for(i: usize, s: usize, sec: usize, g: usize, st: usize, year: i32) -> f64 {
    let base = [50.0, 46.0, 4.8][i];
    let raw = base + s as f64 * 1.5 - sec as f64 * 0.7 + g as f64 * 2.1 - st as f64 * 0.4
        + (year - 2017) as f64 * 0.9;
    (raw * 10.0).round() / 10.0
}

/// Facts in warehouse order: newest survey round first, as the upstream table is loaded.
pub fn raw_facts() -> Vec<RawFact> {
    let mut facts = Vec::new();
    for year in (2017..=2022).rev() {
        for (i, (ic, _)) in INDICATORS.iter().enumerate() {
            for (s, (sc, _)) in STATES.iter().enumerate() {
                for (sec, (secc, _)) in SECTORS.iter().enumerate() {
                    for (g, (gc, _)) in GENDERS.iter().enumerate() {
                        for (st, (stc, _)) in STATUSES.iter().enumerate() {
                            if !published(ic, sc, secc, stc, year) {
                                continue;
                            }
                            facts.push(RawFact {
                                indicator_code: ic.to_string(),
                                state_code: sc.to_string(),
                                sector_code: secc.to_string(),
                                gender_code: gc.to_string(),
                                status_code: stc.to_string(),
                                year,
                                indicator_value: value_for(i, s, sec, g, st, year),
                            });
                        }
                    }
                }
            }
        }
    }
    facts
}

/// A local repository holding the fixture warehouse.
pub fn seeded_repository() -> LocalRepository {
    let repo = LocalRepository::new();
    let tables: [(Dimension, &[(&str, &str)]); 5] = [
        (Dimension::Indicator, &INDICATORS),
        (Dimension::Region, &STATES),
        (Dimension::Sector, &SECTORS),
        (Dimension::Gender, &GENDERS),
        (Dimension::Status, &STATUSES),
    ];
    for (dimension, entries) in tables {
        for (code, name) in entries {
            repo.insert_dimension(dimension, code, name);
        }
    }
    for fact in raw_facts() {
        repo.insert_fact(fact);
    }
    repo
}

pub async fn fixture_dataset() -> Arc<Dataset> {
    let repo = seeded_repository();
    Arc::new(
        plfs_dashboard::db::load_dataset(&repo)
            .await
            .expect("fixture dataset loads"),
    )
}

pub fn row(indicator: &str, region: &str, year: i32, value: f64) -> FactRow {
    FactRow {
        indicator_code: indicator.to_lowercase(),
        indicator_name: indicator.to_string(),
        region_code: region.to_lowercase(),
        region_name: region.to_string(),
        sector_code: "3".to_string(),
        sector_name: "Rural + Urban".to_string(),
        gender_code: "3".to_string(),
        gender_name: "person".to_string(),
        status_code: "1".to_string(),
        status_name: USUAL.to_string(),
        year,
        value,
    }
}

pub fn settings() -> SessionSettings {
    SessionSettings {
        defaults: SelectionState::default(),
        style: ChartStyle::default(),
        order: SeriesOrder::YearAscending,
        renderer: Arc::new(SvgRenderer::default()),
    }
}

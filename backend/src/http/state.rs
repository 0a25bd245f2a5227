//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FactRepository;
use crate::models::Dataset;
use crate::services::controller::SessionSettings;
use crate::services::session_store::SessionStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store the dataset was loaded from, kept for health reporting
    pub repository: Arc<dyn FactRepository>,
    /// Per-user dashboard sessions over the shared dataset
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn FactRepository>,
        dataset: Arc<Dataset>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            repository,
            sessions: SessionStore::new(dataset, settings),
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        self.sessions.dataset()
    }

    pub fn settings(&self) -> &SessionSettings {
        self.sessions.settings()
    }
}

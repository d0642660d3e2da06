//! Shared application state between the watcher and the front end

use crate::analysis::{Recommendation, Selections};
use crate::config::AppConfig;

/// Central state, held behind `Arc<RwLock<_>>`
#[derive(Debug, Clone, Default)]
pub struct SharedAppState {
    /// Application configuration
    pub config: AppConfig,
    /// Current enemy picks and ally carry
    pub selections: Selections,
    /// Latest recommendation for `selections`
    pub recommendation: Option<Recommendation>,
    /// Patch version of the loaded reference data
    pub reference_version: Option<String>,
    /// Runtime state (not persisted)
    pub runtime: RuntimeState,
}

impl SharedAppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Store new selections with their recommendation
    pub fn update_selections(&mut self, selections: Selections, recommendation: Option<Recommendation>) {
        self.selections = selections;
        self.recommendation = recommendation;
    }
}

/// Client connection as last observed by the watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connected,
    InChampSelect,
}

/// Runtime state that is not persisted
#[derive(Debug, Clone, Default)]
pub struct RuntimeState {
    /// Whether the watcher thread is running
    pub is_watching: bool,
    pub connection: ConnectionStatus,
    /// Number of successful exports this session
    pub exports: usize,
    /// Last error message (if any)
    pub last_error: Option<String>,
}

impl RuntimeState {
    /// Clear any error state
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Set an error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.last_error = Some(error.into());
    }
}

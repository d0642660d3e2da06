//! Messages sent from the champion select watcher

use crate::analysis::{Recommendation, Selections};

/// Events emitted by the watcher thread
#[derive(Debug, Clone)]
pub enum WatcherMessage {
    /// Credentials found and the client answered
    Connected,
    /// The client is up but no champion select session exists
    NotInChampSelect,
    /// Enemy picks changed
    SelectionsChanged(Selections),
    /// A fresh recommendation for the new picks
    RecommendationUpdated(Box<Recommendation>),
    /// The rune page (and item set, if enabled) was pushed
    Exported,
    /// Recoverable failure; the watcher keeps polling
    Error(String),
}

//! Shared state and messaging between the watcher and the front end
//!
//! The watcher thread writes into [`SharedAppState`] and announces each
//! change with a [`WatcherMessage`]; the CLI reads both.

pub mod messages;
pub mod state;

pub use messages::WatcherMessage;
pub use state::{ConnectionStatus, RuntimeState, SharedAppState};

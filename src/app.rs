//! Application Coordinator
//!
//! Owns the shared state and the champion select watcher. The watcher runs on
//! a background thread with its own tokio runtime, polls the client, and only
//! recomputes when the observed roster actually changes.

use anyhow::{Context, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::analysis::{apply_observed_roster, recommend, Selections};
use crate::client::export::export_recommendation;
use crate::client::session::fetch_session;
use crate::client::{credentials, ClientError, LcuClient, Transport};
use crate::config::{AppConfig, ClientConfig};
use crate::data::ReferenceData;
use crate::shared::{ConnectionStatus, SharedAppState, WatcherMessage};

/// Lower bound on the poll interval
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Main application coordinator
pub struct PykeDominatorApp {
    /// Shared state between the watcher and the front end
    pub shared_state: Arc<RwLock<SharedAppState>>,
    /// Channel to receive messages from the watcher
    pub from_watcher: Receiver<WatcherMessage>,
    to_front: Sender<WatcherMessage>,
    reference: Arc<ReferenceData>,
    cancel: CancellationToken,
    watcher_handle: Option<JoinHandle<()>>,
}

impl PykeDominatorApp {
    pub fn new(config: AppConfig, reference: Arc<ReferenceData>) -> Self {
        let mut state = SharedAppState::new(config);
        state.reference_version = Some(reference.version.clone()).filter(|v| !v.is_empty());
        let (to_front, from_watcher) = unbounded();

        Self {
            shared_state: Arc::new(RwLock::new(state)),
            from_watcher,
            to_front,
            reference,
            cancel: CancellationToken::new(),
            watcher_handle: None,
        }
    }

    /// Start polling champion select in a background thread
    pub fn start_watcher(&mut self, auto_export: bool) -> Result<()> {
        if self.is_watching() {
            return Ok(());
        }

        let client_config = self.shared_state.read().config.client.clone();
        let watcher = Watcher {
            state: self.shared_state.clone(),
            reference: self.reference.clone(),
            tx: self.to_front.clone(),
            auto_export: auto_export || client_config.auto_export_runes,
            include_item_set: client_config.export_item_set,
            in_champ_select: false,
            connected: false,
            reported_failure: false,
        };
        let cancel = self.cancel.clone();

        self.shared_state.write().runtime.is_watching = true;

        let handle = std::thread::Builder::new()
            .name("champ-select-watcher".to_string())
            .spawn(move || {
                info!("Watcher thread starting...");
                if let Err(e) = run_watcher(watcher, client_config, cancel) {
                    error!("Watcher error: {:#}", e);
                }
                info!("Watcher thread exiting...");
            })
            .context("Failed to spawn watcher thread")?;

        self.watcher_handle = Some(handle);
        Ok(())
    }

    /// Signal the watcher to stop and wait for it
    pub fn stop_watcher(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.watcher_handle.take() {
            let _ = handle.join();
        }
        self.shared_state.write().runtime.is_watching = false;
    }

    /// Get current shared state
    pub fn state(&self) -> Arc<RwLock<SharedAppState>> {
        self.shared_state.clone()
    }

    pub fn is_watching(&self) -> bool {
        self.watcher_handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for PykeDominatorApp {
    fn drop(&mut self) {
        self.stop_watcher();
    }
}

/// Connect to the client described by the config
pub fn connect(config: &ClientConfig) -> Result<LcuClient, ClientError> {
    let creds = credentials::discover(config)?;
    info!("Connecting to client on port {}", creds.port);
    LcuClient::new(&creds)
}

/// Watcher loop: reconnects as needed until cancelled
fn run_watcher(mut watcher: Watcher, config: ClientConfig, cancel: CancellationToken) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start watcher runtime")?;
    let interval = Duration::from_millis(config.poll_interval_ms).max(MIN_POLL_INTERVAL);

    runtime.block_on(async move {
        let mut client: Option<LcuClient> = None;

        loop {
            if client.is_none() {
                match connect(&config) {
                    Ok(c) => client = Some(c),
                    Err(e) => watcher.report_failure(format!("Client not available: {}", e)),
                }
            }

            if let Some(c) = &client {
                if watcher.tick(c).await {
                    client = None;
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }
    });

    Ok(())
}

/// Per-poll state transitions of the watcher
struct Watcher {
    state: Arc<RwLock<SharedAppState>>,
    reference: Arc<ReferenceData>,
    tx: Sender<WatcherMessage>,
    auto_export: bool,
    include_item_set: bool,
    in_champ_select: bool,
    /// Set by the first successful poll, not by finding credentials
    connected: bool,
    /// A failure was reported and nothing has succeeded since
    reported_failure: bool,
}

impl Watcher {
    fn send(&self, message: WatcherMessage) {
        // The front end may already be gone during shutdown
        let _ = self.tx.send(message);
    }

    fn set_connection(&self, status: ConnectionStatus) {
        self.state.write().runtime.connection = status;
    }

    fn report_error(&self, message: String) {
        self.state.write().runtime.set_error(message.clone());
        self.send(WatcherMessage::Error(message));
    }

    /// Report a failure once per outage; repeats only go to the debug log
    fn report_failure(&mut self, message: String) {
        if self.reported_failure {
            debug!("{}", message);
            return;
        }
        warn!("{}", message);
        self.reported_failure = true;
        self.report_error(message);
    }

    fn mark_connected(&mut self) {
        self.reported_failure = false;
        if !self.connected {
            info!("Connected to the game client");
            self.connected = true;
            self.set_connection(ConnectionStatus::Connected);
            self.send(WatcherMessage::Connected);
        }
    }

    fn mark_disconnected(&mut self) {
        self.connected = false;
        self.in_champ_select = false;
        self.set_connection(ConnectionStatus::Disconnected);
    }

    /// Poll once and absorb the error; `true` means the connection should be dropped
    async fn tick(&mut self, transport: &dyn Transport) -> bool {
        let Err(e) = self.poll(transport).await else {
            return false;
        };
        self.report_failure(format!("Champion select poll failed: {}", e));
        // Connection-level failure: the client is down or restarted on a new port
        if matches!(e, ClientError::Transport(_)) {
            self.mark_disconnected();
            return true;
        }
        false
    }

    /// One poll of champion select
    async fn poll(&mut self, transport: &dyn Transport) -> Result<(), ClientError> {
        let session = fetch_session(transport).await?;
        self.mark_connected();

        let Some(session) = session else {
            if self.in_champ_select {
                info!("Champion select ended");
                self.in_champ_select = false;
                self.reset_enemies();
                self.set_connection(ConnectionStatus::Connected);
                self.send(WatcherMessage::NotInChampSelect);
            }
            return Ok(());
        };

        if !self.in_champ_select {
            info!("Champion select started");
            self.in_champ_select = true;
            self.set_connection(ConnectionStatus::InChampSelect);
        }

        let observed = session.observed_members(&self.reference);
        let current = self.state.read().selections.clone();
        let (next, changed) = apply_observed_roster(&current, &observed);
        if !changed {
            return Ok(());
        }

        let recommendation = recommend(&next);
        {
            let mut state = self.state.write();
            state.update_selections(next.clone(), recommendation.clone());
            state.runtime.clear_error();
        }
        self.send(WatcherMessage::SelectionsChanged(next));

        let Some(recommendation) = recommendation else {
            return Ok(());
        };
        self.send(WatcherMessage::RecommendationUpdated(Box::new(recommendation.clone())));

        if self.auto_export {
            export_recommendation(
                transport,
                &recommendation.runes,
                &recommendation.build,
                self.include_item_set,
            )
            .await?;
            self.state.write().runtime.exports += 1;
            self.send(WatcherMessage::Exported);
        }
        Ok(())
    }

    /// Forget the previous lobby's enemies, keep the ally carry
    fn reset_enemies(&self) {
        let mut state = self.state.write();
        let cleared = Selections::new().with_ally_carry(state.selections.ally_carry().cloned());
        state.update_selections(cleared, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Role;
    use crate::client::session::SESSION_PATH;
    use crate::client::testing::{block_on, FakeTransport};
    use crate::client::LcuResponse;
    use crate::data::{Champion, Tag};
    use reqwest::Method;
    use serde_json::json;

    fn reference() -> Arc<ReferenceData> {
        Arc::new(ReferenceData {
            version: "15.1.1".to_string(),
            champions: vec![
                Champion::new("Darius", "122", "Darius", &[Tag::Fighter, Tag::Tank]),
                Champion::new("Jinx", "222", "Jinx", &[Tag::Marksman]),
                Champion::new("Ahri", "103", "Ahri", &[Tag::Mage, Tag::Assassin]),
            ],
            ..ReferenceData::default()
        })
    }

    fn watcher(auto_export: bool) -> (Watcher, Receiver<WatcherMessage>) {
        let (tx, rx) = unbounded();
        let watcher = Watcher {
            state: Arc::new(RwLock::new(SharedAppState::default())),
            reference: reference(),
            tx,
            auto_export,
            include_item_set: false,
            in_champ_select: false,
            connected: false,
            reported_failure: false,
        };
        (watcher, rx)
    }

    fn session(team: serde_json::Value) -> LcuResponse {
        LcuResponse::Success(json!({ "theirTeam": team }))
    }

    #[test]
    fn test_unchanged_roster_recomputes_once() {
        let (mut watcher, rx) = watcher(false);
        let transport = FakeTransport::new().route(
            Method::GET,
            SESSION_PATH,
            session(json!([{ "championId": 122 }, { "championId": 222, "assignedPosition": "BOTTOM" }])),
        );

        for _ in 0..3 {
            block_on(watcher.poll(&transport)).unwrap();
        }

        let messages: Vec<WatcherMessage> = rx.try_iter().collect();
        let updates = messages
            .iter()
            .filter(|m| matches!(m, WatcherMessage::RecommendationUpdated(_)))
            .count();
        assert_eq!(updates, 1);

        let state = watcher.state.read();
        assert_eq!(state.selections.enemy(Role::Top).map(|c| c.id.as_str()), Some("Darius"));
        assert_eq!(state.selections.enemy(Role::Bot).map(|c| c.id.as_str()), Some("Jinx"));
        assert_eq!(state.runtime.connection, ConnectionStatus::InChampSelect);
    }

    #[test]
    fn test_leaving_champ_select_clears_enemies() {
        let (mut watcher, rx) = watcher(false);
        let in_lobby = FakeTransport::new().route(Method::GET, SESSION_PATH, session(json!([{ "championId": 103 }])));
        block_on(watcher.poll(&in_lobby)).unwrap();
        assert!(watcher.state.read().selections.has_enemies());

        let outside = FakeTransport::new();
        block_on(watcher.poll(&outside)).unwrap();

        let state = watcher.state.read();
        assert!(!state.selections.has_enemies());
        assert!(state.recommendation.is_none());
        assert!(rx.try_iter().any(|m| matches!(m, WatcherMessage::NotInChampSelect)));
    }

    #[test]
    fn test_not_found_outside_champ_select_is_quiet() {
        let (mut watcher, rx) = watcher(false);
        block_on(watcher.poll(&FakeTransport::new())).unwrap();
        block_on(watcher.poll(&FakeTransport::new())).unwrap();

        let messages: Vec<WatcherMessage> = rx.try_iter().collect();
        assert_eq!(messages.len(), 1);
        assert!(matches!(messages[0], WatcherMessage::Connected));
    }

    fn refused() -> FakeTransport {
        FakeTransport::new().route(
            Method::GET,
            SESSION_PATH,
            LcuResponse::Error {
                status: None,
                message: "connection refused".to_string(),
            },
        )
    }

    #[test]
    fn test_stale_credentials_never_announce_connection() {
        let (mut watcher, rx) = watcher(false);
        let transport = refused();

        for _ in 0..5 {
            assert!(block_on(watcher.tick(&transport)));
        }

        let messages: Vec<WatcherMessage> = rx.try_iter().collect();
        assert!(!messages.iter().any(|m| matches!(m, WatcherMessage::Connected)));
        let errors = messages.iter().filter(|m| matches!(m, WatcherMessage::Error(_))).count();
        assert_eq!(errors, 1);
        assert_eq!(watcher.state.read().runtime.connection, ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_recovery_announces_once_and_rearms_errors() {
        let (mut watcher, rx) = watcher(false);
        assert!(block_on(watcher.tick(&refused())));

        let up = FakeTransport::new();
        assert!(!block_on(watcher.tick(&up)));
        assert!(!block_on(watcher.tick(&up)));
        assert!(block_on(watcher.tick(&refused())));

        let messages: Vec<WatcherMessage> = rx.try_iter().collect();
        let connected = messages.iter().filter(|m| matches!(m, WatcherMessage::Connected)).count();
        let errors = messages.iter().filter(|m| matches!(m, WatcherMessage::Error(_))).count();
        assert_eq!(connected, 1);
        assert_eq!(errors, 2);
    }

    #[test]
    fn test_http_error_keeps_connection() {
        let (mut watcher, _rx) = watcher(false);
        let transport = FakeTransport::new().route(
            Method::GET,
            SESSION_PATH,
            LcuResponse::Error {
                status: Some(500),
                message: "busy".to_string(),
            },
        );
        assert!(!block_on(watcher.tick(&transport)));
    }

    #[test]
    fn test_auto_export_pushes_rune_page() {
        let (mut watcher, rx) = watcher(true);
        let transport = FakeTransport::new()
            .route(Method::GET, SESSION_PATH, session(json!([{ "championId": 222 }])))
            .route(Method::GET, "/lol-perks/v1/pages", LcuResponse::Success(json!([])))
            .route(Method::POST, "/lol-perks/v1/pages", LcuResponse::Success(json!({ "id": 1 })));

        block_on(watcher.poll(&transport)).unwrap();
        block_on(watcher.poll(&transport)).unwrap();

        assert_eq!(transport.calls_to(&Method::POST, "/lol-perks/v1/pages").len(), 1);
        assert_eq!(watcher.state.read().runtime.exports, 1);
        assert!(rx.try_iter().any(|m| matches!(m, WatcherMessage::Exported)));
    }

    #[test]
    fn test_session_error_propagates() {
        let (mut watcher, _rx) = watcher(false);
        let transport = FakeTransport::new().route(
            Method::GET,
            SESSION_PATH,
            LcuResponse::Error {
                status: None,
                message: "connection refused".to_string(),
            },
        );
        let err = block_on(watcher.poll(&transport)).unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn test_app_records_reference_version() {
        let app = PykeDominatorApp::new(AppConfig::default(), reference());
        assert_eq!(app.state().read().reference_version.as_deref(), Some("15.1.1"));
        assert!(!app.is_watching());
    }
}

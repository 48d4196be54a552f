//! Application state management

use crate::announcer::{NarrationAnnouncer, NarrationCue};
use crate::config::Config;
use crate::error::Result;
use crate::tasks::MemoryTaskStore;
use cockpit_core::{
    announcer::{Announcer, SilentAnnouncer},
    task::TaskStore,
    FieldMask, RaceSnapshot,
};
use cockpit_sim::{RaceSession, TickerKind};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tokio_util::sync::CancellationToken;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The race, ticked by the clock tasks and read by the API
    pub session: Arc<RwLock<RaceSession>>,

    /// Broadcast channel for race snapshots, one per component tick
    pub snapshot_tx: broadcast::Sender<RaceSnapshot>,

    /// Broadcast channel for narration cues heard by the dashboard
    pub narration_tx: broadcast::Sender<NarrationCue>,

    pub tasks: Arc<dyn TaskStore>,

    /// Cancels the clock tasks of the running race
    pub clock: Arc<RwLock<Option<CancellationToken>>>,

    pub config: Arc<Config>,
}

impl AppState {
    /// State built from default configuration
    pub fn new() -> Self {
        Self::from_config(Config::default())
    }

    pub fn from_config(config: Config) -> Self {
        // Create broadcast channels with capacity for 100 messages
        let (snapshot_tx, _) = broadcast::channel(100);
        let (narration_tx, _) = broadcast::channel(100);

        let announcer: Arc<dyn Announcer> = if config.narration.enabled {
            Arc::new(NarrationAnnouncer::new(
                narration_tx.clone(),
                config.narration.words_per_minute,
            ))
        } else {
            Arc::new(SilentAnnouncer)
        };

        let mut builder = RaceSession::builder()
            .announcer(announcer)
            .circuit(&config.race.circuit)
            .tracker_period(config.period(TickerKind::Tracker));
        if let Some(seed) = config.race.seed {
            builder = builder.seed(seed);
        }

        Self {
            session: Arc::new(RwLock::new(builder.build())),
            snapshot_tx,
            narration_tx,
            tasks: Arc::new(MemoryTaskStore::new()),
            clock: Arc::new(RwLock::new(None)),
            config: Arc::new(config),
        }
    }

    /// Replace the task store
    pub fn with_task_store(mut self, tasks: Arc<dyn TaskStore>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Subscribe to race snapshots
    pub fn subscribe(&self) -> broadcast::Receiver<RaceSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Subscribe to narration cues
    pub fn subscribe_narration(&self) -> broadcast::Receiver<NarrationCue> {
        self.narration_tx.subscribe()
    }

    pub async fn snapshot(&self) -> RaceSnapshot {
        self.session.read().await.snapshot()
    }

    pub async fn snapshot_json(&self, mask: Option<&FieldMask>) -> Result<String> {
        Ok(self.snapshot().await.to_json_filtered(mask)?)
    }

    /// Send the current snapshot to every subscriber
    pub async fn publish_snapshot(&self) {
        let snapshot = self.snapshot().await;
        // Ignore error if no receivers (they'll get the next snapshot)
        let _ = self.snapshot_tx.send(snapshot);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

//! Playback engine
//!
//! Owns the [`PlaybackScheduler`] inside a single tokio task and advances it
//! on discrete inputs: submissions, asset-load results and a frame tick.
//! Asset loads run as spawned tasks and report back through the same
//! channel tagged with their ticket, so a slow load can never bypass the
//! scheduler's stale-result check.

use super::events::EngineMessage;
use super::scheduler::{PlaybackScheduler, SchedulerAction};
use super::types::{PlaybackStatus, SchedulerConfig};
use crate::assets::AssetResolver;
use crate::error::{Error, Result};
use crate::state::SharedState;
use chrono::Utc;
use signa_common::events::SignaEvent;
use signa_common::GlossSequence;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use uuid::Uuid;

/// Handle to the running playback engine
pub struct PlaybackEngine {
    tx: mpsc::UnboundedSender<EngineMessage>,
    state: Arc<SharedState>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PlaybackEngine {
    /// Spawn the engine task
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        config: SchedulerConfig,
        tick_interval: Duration,
        resolver: Arc<dyn AssetResolver>,
        state: Arc<SharedState>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let worker = EngineWorker {
            scheduler: PlaybackScheduler::new(config),
            resolver,
            state: Arc::clone(&state),
            tx: tx.clone(),
            published: PlaybackStatus::default(),
        };

        let task = tokio::spawn(worker.run(rx, tick_interval));
        info!("Playback engine started (tick {} ms)", tick_interval.as_millis());

        Self {
            tx,
            state,
            task: Mutex::new(Some(task)),
        }
    }

    /// Submit a gloss sequence, replacing whatever has not started yet
    ///
    /// Returns the id assigned to the sequence.
    pub fn submit(&self, speech: impl Into<String>, sequence: GlossSequence) -> Result<Uuid> {
        let sequence_id = Uuid::new_v4();
        self.tx
            .send(EngineMessage::Submit {
                sequence_id,
                speech: speech.into(),
                sequence,
            })
            .map_err(|_| Error::Playback("Playback engine is not running".to_string()))?;
        Ok(sequence_id)
    }

    /// Latest published scheduler status
    pub async fn status(&self) -> PlaybackStatus {
        self.state.get_status().await
    }

    pub fn state(&self) -> &Arc<SharedState> {
        &self.state
    }

    /// Stop the engine task and wait for it to exit
    pub async fn shutdown(&self) {
        let _ = self.tx.send(EngineMessage::Shutdown);
        if let Some(task) = self.task.lock().await.take() {
            let _ = task.await;
        }
        info!("Playback engine stopped");
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        // Worker holds its own sender for load results, so stop it explicitly
        let _ = self.tx.send(EngineMessage::Shutdown);
    }
}

/// State owned by the engine task
struct EngineWorker {
    scheduler: PlaybackScheduler,
    resolver: Arc<dyn AssetResolver>,
    state: Arc<SharedState>,
    tx: mpsc::UnboundedSender<EngineMessage>,
    published: PlaybackStatus,
}

impl EngineWorker {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<EngineMessage>, tick_interval: Duration) {
        let mut ticker = tokio::time::interval(tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let actions = tokio::select! {
                msg = rx.recv() => match msg {
                    Some(EngineMessage::Submit { sequence_id, speech, sequence }) => {
                        self.state.broadcast_event(SignaEvent::SequenceSubmitted {
                            sequence_id,
                            speech,
                            gloss: sequence.labels(),
                            timestamp: Utc::now(),
                        });
                        self.scheduler.submit(sequence_id, &sequence, now())
                    }
                    Some(EngineMessage::AssetLoaded { ticket, result }) => {
                        self.scheduler.on_asset_loaded(ticket, result, now())
                    }
                    Some(EngineMessage::Shutdown) | None => break,
                },
                _ = ticker.tick() => self.scheduler.tick(now()),
            };

            self.apply(actions);
            self.publish_status().await;
        }

        debug!("Engine task exiting");
    }

    fn apply(&self, actions: Vec<SchedulerAction>) {
        for action in actions {
            match action {
                SchedulerAction::LoadAsset { ticket, key } => {
                    let resolver = Arc::clone(&self.resolver);
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        let result = resolver.load(&key).await;
                        // Engine may have stopped; the result is simply dropped
                        let _ = tx.send(EngineMessage::AssetLoaded { ticket, result });
                    });
                }
                SchedulerAction::CueStarted(cue) => {
                    self.state.broadcast_event(SignaEvent::CueStarted {
                        sequence_id: cue.sequence_id,
                        label: cue.label,
                        source: cue.source,
                        asset: cue.asset,
                        duration_ms: cue.duration_ms,
                        timestamp: Utc::now(),
                    });
                }
                SchedulerAction::Fallback {
                    sequence_id,
                    label,
                    missing,
                } => {
                    self.state.broadcast_event(SignaEvent::AssetFallback {
                        sequence_id,
                        label,
                        missing: missing.to_string(),
                        timestamp: Utc::now(),
                    });
                }
                SchedulerAction::CueCompleted { sequence_id, label } => {
                    self.state.broadcast_event(SignaEvent::CueCompleted {
                        sequence_id,
                        label,
                        timestamp: Utc::now(),
                    });
                }
                SchedulerAction::QueueDrained => {
                    self.state.broadcast_event(SignaEvent::QueueDrained {
                        timestamp: Utc::now(),
                    });
                }
            }
        }
    }

    async fn publish_status(&mut self) {
        let status = self.scheduler.status();
        if status != self.published {
            self.state.set_status(status.clone()).await;
            self.published = status;
        }
    }
}

/// Scheduler clock; follows tokio's clock so paused-time tests are deterministic
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

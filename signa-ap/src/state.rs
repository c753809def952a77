//! Shared playback state
//!
//! Read-mostly view of the scheduler for API handlers, plus the event
//! broadcaster feeding SSE clients. Only the engine task writes here; the
//! scheduler itself is never shared.

use crate::playback::types::PlaybackStatus;
use signa_common::events::SignaEvent;
use tokio::sync::{broadcast, RwLock};

/// Shared state accessible by all components
pub struct SharedState {
    /// Latest scheduler snapshot published by the engine
    pub status: RwLock<PlaybackStatus>,

    /// Event broadcaster for SSE events
    pub event_tx: broadcast::Sender<SignaEvent>,
}

impl SharedState {
    /// Create new shared state with default values
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self {
            status: RwLock::new(PlaybackStatus::default()),
            event_tx,
        }
    }

    /// Broadcast an event to all SSE listeners
    pub fn broadcast_event(&self, event: SignaEvent) {
        // No receivers is OK
        let _ = self.event_tx.send(event);
    }

    /// Subscribe to event stream for SSE
    pub fn subscribe_events(&self) -> broadcast::Receiver<SignaEvent> {
        self.event_tx.subscribe()
    }

    pub async fn get_status(&self) -> PlaybackStatus {
        self.status.read().await.clone()
    }

    pub async fn set_status(&self, status: PlaybackStatus) {
        *self.status.write().await = status;
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

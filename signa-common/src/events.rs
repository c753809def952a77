//! Event types for the Signa event system
//!
//! Broadcast by the playback engine and streamed to rendering clients over
//! SSE. The rendering client drives the avatar from `CueStarted` events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where the animation for a cue came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueSource {
    /// Animation named after the gloss label
    Sign,
    /// Per-letter finger-spelling animation
    Letter,
    /// Inert labeled stand-in, no asset
    Placeholder,
    /// SILENCE rest, no asset
    Rest,
}

impl std::fmt::Display for CueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CueSource::Sign => write!(f, "sign"),
            CueSource::Letter => write!(f, "letter"),
            CueSource::Placeholder => write!(f, "placeholder"),
            CueSource::Rest => write!(f, "rest"),
        }
    }
}

/// Scheduler mode as reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerMode {
    Idle,
    Playing,
    Transitioning,
}

impl std::fmt::Display for SchedulerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulerMode::Idle => write!(f, "idle"),
            SchedulerMode::Playing => write!(f, "playing"),
            SchedulerMode::Transitioning => write!(f, "transitioning"),
        }
    }
}

/// Signa event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SignaEvent {
    /// New gloss sequence replaced the pending queue
    SequenceSubmitted {
        sequence_id: Uuid,
        speech: String,
        gloss: Vec<String>,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A cue was dispatched to the renderer
    CueStarted {
        sequence_id: Uuid,
        /// Gloss label of the token being shown
        label: String,
        source: CueSource,
        /// Asset to play, relative to the assets directory (None for placeholder/rest)
        asset: Option<String>,
        duration_ms: u64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Asset resolution fell back to a lower tier
    AssetFallback {
        sequence_id: Uuid,
        label: String,
        missing: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Active cue reached its declared duration
    CueCompleted {
        sequence_id: Uuid,
        label: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Queue empty and scheduler idle
    QueueDrained {
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl SignaEvent {
    /// Event name used for the SSE `event:` field
    pub fn event_type(&self) -> &'static str {
        match self {
            SignaEvent::SequenceSubmitted { .. } => "SequenceSubmitted",
            SignaEvent::CueStarted { .. } => "CueStarted",
            SignaEvent::AssetFallback { .. } => "AssetFallback",
            SignaEvent::CueCompleted { .. } => "CueCompleted",
            SignaEvent::QueueDrained { .. } => "QueueDrained",
        }
    }
}

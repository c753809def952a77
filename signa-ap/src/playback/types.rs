//! Playback scheduler types

use serde::Serialize;
use signa_common::config::PlaybackConfig;
use signa_common::events::{CueSource, SchedulerMode};
use signa_common::GlossToken;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Identifier of one outstanding asset load
///
/// Tickets increase monotonically; a load result is applied only if its
/// ticket is the one the scheduler is still waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LoadTicket(pub u64);

impl std::fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One queued playback item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackItem {
    /// Sign or finger-spelled letter; `sustain` holds it after completion
    Sign { token: GlossToken, sustain: bool },
    /// SILENCE: shown as a rest, no asset resolution
    Rest,
}

impl PlaybackItem {
    pub fn label(&self) -> &str {
        match self {
            PlaybackItem::Sign { token, .. } => token.label(),
            PlaybackItem::Rest => "SILENCE",
        }
    }
}

/// Queue entry: an item tagged with the sequence it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub sequence_id: Uuid,
    pub item: PlaybackItem,
}

/// Cue currently dispatched to the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveCue {
    pub sequence_id: Uuid,
    pub label: String,
    pub source: CueSource,
    /// Asset path relative to the assets directory
    pub asset: Option<String>,
    /// Duration declared at dispatch time
    pub duration: Duration,
    pub started_at: Instant,
    /// Extra time added to the transition after completion
    pub hold: Duration,
}

impl ActiveCue {
    /// Whether playback has reached the declared duration, within tolerance
    pub fn is_complete(&self, now: Instant, tolerance: Duration) -> bool {
        let elapsed = now.saturating_duration_since(self.started_at);
        elapsed + tolerance >= self.duration
    }
}

/// Scheduler mode with its data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    /// No active cue; a load for the queue head may be outstanding
    Idle,
    /// Exactly one cue dispatched and not yet complete
    Playing(ActiveCue),
    /// Blend window after a cue completes
    Transitioning { until: Instant },
}

impl PlaybackState {
    pub fn mode(&self) -> SchedulerMode {
        match self {
            PlaybackState::Idle => SchedulerMode::Idle,
            PlaybackState::Playing(_) => SchedulerMode::Playing,
            PlaybackState::Transitioning { .. } => SchedulerMode::Transitioning,
        }
    }

    pub fn active(&self) -> Option<&ActiveCue> {
        match self {
            PlaybackState::Playing(cue) => Some(cue),
            _ => None,
        }
    }
}

/// Timing parameters of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub completion_tolerance: Duration,
    pub transition_cooldown: Duration,
    pub placeholder_duration: Duration,
    pub silence_duration: Duration,
    pub sustain_hold: Duration,
}

impl From<&PlaybackConfig> for SchedulerConfig {
    fn from(config: &PlaybackConfig) -> Self {
        Self {
            completion_tolerance: config.completion_tolerance(),
            transition_cooldown: config.transition_cooldown(),
            placeholder_duration: config.placeholder_duration(),
            silence_duration: config.silence_duration(),
            sustain_hold: config.sustain_hold(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::from(&PlaybackConfig::default())
    }
}

/// Serializable view of the active cue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CueInfo {
    pub sequence_id: Uuid,
    pub label: String,
    pub source: CueSource,
    pub asset: Option<String>,
    pub duration_ms: u64,
}

impl From<&ActiveCue> for CueInfo {
    fn from(cue: &ActiveCue) -> Self {
        Self {
            sequence_id: cue.sequence_id,
            label: cue.label.clone(),
            source: cue.source,
            asset: cue.asset.clone(),
            duration_ms: cue.duration.as_millis() as u64,
        }
    }
}

/// Point-in-time scheduler status for the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackStatus {
    pub mode: SchedulerMode,
    pub current: Option<CueInfo>,
    /// Label whose asset load is outstanding, if any
    pub loading: Option<String>,
    pub queue_length: usize,
    pub queued: Vec<String>,
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        Self {
            mode: SchedulerMode::Idle,
            current: None,
            loading: None,
            queue_length: 0,
            queued: Vec::new(),
        }
    }
}

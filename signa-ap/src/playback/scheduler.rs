//! Playback scheduler
//!
//! Explicit state machine that plays exactly one cue at a time. It advances
//! only on discrete inputs:
//! - [`PlaybackScheduler::submit`]: a new gloss sequence
//! - [`PlaybackScheduler::on_asset_loaded`]: an asset load finished
//! - [`PlaybackScheduler::tick`]: frame tick, used for completion checks
//!
//! Each input returns the [`SchedulerAction`]s the owner must carry out
//! (start a load, show a cue, publish an event). The scheduler itself does no
//! I/O and reads no clock; callers pass `now`.
//!
//! ```text
//!   Idle ──dequeue──▶ (load outstanding) ──loaded/fallback──▶ Playing
//!    ▲                                                          │
//!    └──────── cooldown elapsed ◀── Transitioning ◀──complete───┘
//! ```

use super::fallback::FallbackChain;
use super::queue::{entries_from_sequence, PlaybackQueue};
use super::types::{
    ActiveCue, CueInfo, LoadTicket, PlaybackItem, PlaybackState, PlaybackStatus, QueueEntry,
    SchedulerConfig,
};
use crate::assets::{AnimationAsset, AssetError, AssetKey};
use signa_common::events::{CueSource, SchedulerMode};
use signa_common::GlossSequence;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Work requested by the scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerAction {
    /// Start loading `key`; report back with the same ticket
    LoadAsset { ticket: LoadTicket, key: AssetKey },
    /// A cue became active and must be shown
    CueStarted(CueInfo),
    /// An asset was missing and the chain moved on
    Fallback {
        sequence_id: Uuid,
        label: String,
        missing: AssetKey,
    },
    /// The active cue reached its declared duration
    CueCompleted { sequence_id: Uuid, label: String },
    /// Nothing left to play
    QueueDrained,
}

/// Load in flight for the dequeued head entry
#[derive(Debug)]
struct PendingLoad {
    ticket: LoadTicket,
    entry: QueueEntry,
    key: AssetKey,
    chain: FallbackChain,
}

/// Single-owner playback state machine
#[derive(Debug)]
pub struct PlaybackScheduler {
    config: SchedulerConfig,
    state: PlaybackState,
    queue: PlaybackQueue,
    pending: Option<PendingLoad>,
    next_ticket: u64,
    /// Set once QueueDrained was reported for the current idle period
    drained: bool,
}

impl PlaybackScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            state: PlaybackState::Idle,
            queue: PlaybackQueue::new(),
            pending: None,
            next_ticket: 1,
            drained: true,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn mode(&self) -> SchedulerMode {
        self.state.mode()
    }

    pub fn active(&self) -> Option<&ActiveCue> {
        self.state.active()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Ticket of the outstanding load, if any
    pub fn pending_ticket(&self) -> Option<LoadTicket> {
        self.pending.as_ref().map(|p| p.ticket)
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            mode: self.mode(),
            current: self.active().map(CueInfo::from),
            loading: self.pending.as_ref().map(|p| p.entry.item.label().to_string()),
            queue_length: self.queue.len(),
            queued: self.queue.labels(),
        }
    }

    /// Replace pending cues with a new sequence
    ///
    /// A cue that is already playing (or in its transition) runs to
    /// completion. A load still outstanding for a not-yet-started head entry
    /// belongs to the old queue and is abandoned; its result will be
    /// discarded as stale.
    pub fn submit(
        &mut self,
        sequence_id: Uuid,
        sequence: &GlossSequence,
        now: Instant,
    ) -> Vec<SchedulerAction> {
        let entries = entries_from_sequence(sequence_id, sequence);
        let discarded = self.queue.replace(entries);

        if let Some(pending) = self.pending.take() {
            debug!(
                "Abandoning load {} for {:?} (replaced by sequence {})",
                pending.ticket,
                pending.entry.item.label(),
                sequence_id
            );
        }

        info!(
            "Sequence {} submitted: {} cues queued, {} pending discarded, scheduler {}",
            sequence_id,
            self.queue.len(),
            discarded,
            self.mode()
        );

        self.drained = false;
        let mut actions = Vec::new();
        self.advance(now, &mut actions);
        actions
    }

    /// Apply an asset load result
    ///
    /// Results for any ticket other than the outstanding one are stale and
    /// dropped without effect.
    pub fn on_asset_loaded(
        &mut self,
        ticket: LoadTicket,
        result: Result<AnimationAsset, AssetError>,
        now: Instant,
    ) -> Vec<SchedulerAction> {
        let mut actions = Vec::new();

        let is_current = self.pending.as_ref().is_some_and(|p| p.ticket == ticket);
        if !is_current {
            debug!("Discarding stale asset load {}", ticket);
            return actions;
        }

        let Some(mut pending) = self.pending.take() else {
            return actions;
        };

        match result {
            Ok(asset) => {
                let hold = self.hold_for(&pending.entry);
                let cue = ActiveCue {
                    sequence_id: pending.entry.sequence_id,
                    label: pending.entry.item.label().to_string(),
                    source: asset.key.cue_source(),
                    asset: Some(asset.path),
                    duration: asset.duration,
                    started_at: now,
                    hold,
                };
                self.start_cue(cue, &mut actions);
            }
            Err(e) => {
                if e.is_not_found() {
                    debug!("{}", e);
                } else {
                    warn!("Asset load failed, falling back: {}", e);
                }

                actions.push(SchedulerAction::Fallback {
                    sequence_id: pending.entry.sequence_id,
                    label: pending.entry.item.label().to_string(),
                    missing: pending.key.clone(),
                });

                match pending.chain.next_key() {
                    Some(key) => {
                        pending.ticket = self.issue_ticket();
                        pending.key = key.clone();
                        actions.push(SchedulerAction::LoadAsset {
                            ticket: pending.ticket,
                            key,
                        });
                        self.pending = Some(pending);
                    }
                    None => self.start_placeholder(pending.entry, now, &mut actions),
                }
            }
        }

        actions
    }

    /// Frame tick: detect completion and end of transition
    pub fn tick(&mut self, now: Instant) -> Vec<SchedulerAction> {
        let mut actions = Vec::new();
        self.advance(now, &mut actions);
        actions
    }

    /// Drive the state machine as far as `now` allows
    fn advance(&mut self, now: Instant, actions: &mut Vec<SchedulerAction>) {
        loop {
            match &self.state {
                PlaybackState::Playing(cue) => {
                    if !cue.is_complete(now, self.config.completion_tolerance) {
                        return;
                    }

                    let until = now + self.config.transition_cooldown + cue.hold;
                    debug!("Cue {} complete, transitioning", cue.label);
                    actions.push(SchedulerAction::CueCompleted {
                        sequence_id: cue.sequence_id,
                        label: cue.label.clone(),
                    });
                    self.state = PlaybackState::Transitioning { until };
                }
                PlaybackState::Transitioning { until } => {
                    if now < *until {
                        return;
                    }
                    self.state = PlaybackState::Idle;
                }
                PlaybackState::Idle => {
                    if self.pending.is_some() {
                        return;
                    }

                    match self.queue.pop_front() {
                        Some(entry) => self.dispatch(entry, now, actions),
                        None => {
                            if !self.drained {
                                self.drained = true;
                                debug!("Queue drained");
                                actions.push(SchedulerAction::QueueDrained);
                            }
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Begin playing a dequeued entry
    fn dispatch(&mut self, entry: QueueEntry, now: Instant, actions: &mut Vec<SchedulerAction>) {
        match &entry.item {
            PlaybackItem::Rest => {
                let cue = ActiveCue {
                    sequence_id: entry.sequence_id,
                    label: entry.item.label().to_string(),
                    source: CueSource::Rest,
                    asset: None,
                    duration: self.config.silence_duration,
                    started_at: now,
                    hold: Duration::ZERO,
                };
                self.start_cue(cue, actions);
            }
            PlaybackItem::Sign { token, .. } => {
                let mut chain = FallbackChain::for_token(token);
                match chain.next_key() {
                    Some(key) => {
                        let ticket = self.issue_ticket();
                        debug!("Loading {} for {} ({})", key, token, ticket);
                        actions.push(SchedulerAction::LoadAsset {
                            ticket,
                            key: key.clone(),
                        });
                        self.pending = Some(PendingLoad {
                            ticket,
                            entry,
                            key,
                            chain,
                        });
                    }
                    None => self.start_placeholder(entry, now, actions),
                }
            }
        }
    }

    fn start_placeholder(&mut self, entry: QueueEntry, now: Instant, actions: &mut Vec<SchedulerAction>) {
        debug!("Showing placeholder for {}", entry.item.label());
        let cue = ActiveCue {
            sequence_id: entry.sequence_id,
            label: entry.item.label().to_string(),
            source: CueSource::Placeholder,
            asset: None,
            duration: self.config.placeholder_duration,
            started_at: now,
            hold: self.hold_for(&entry),
        };
        self.start_cue(cue, actions);
    }

    fn start_cue(&mut self, cue: ActiveCue, actions: &mut Vec<SchedulerAction>) {
        debug_assert!(
            matches!(self.state, PlaybackState::Idle),
            "cue started while another is active"
        );
        info!(
            "Playing {} ({}, {} ms)",
            cue.label,
            cue.source,
            cue.duration.as_millis()
        );
        actions.push(SchedulerAction::CueStarted(CueInfo::from(&cue)));
        self.state = PlaybackState::Playing(cue);
    }

    fn hold_for(&self, entry: &QueueEntry) -> Duration {
        match entry.item {
            PlaybackItem::Sign { sustain: true, .. } => self.config.sustain_hold,
            _ => Duration::ZERO,
        }
    }

    fn issue_ticket(&mut self) -> LoadTicket {
        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }
}

impl Default for PlaybackScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

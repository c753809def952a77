//! Playback queue
//!
//! Strict FIFO of pending cues, owned by the scheduler. A new gloss sequence
//! replaces the pending contents wholesale; old and new utterances are never
//! merged.

use super::types::{PlaybackItem, QueueEntry};
use signa_common::{GlossSequence, GlossToken, Marker};
use std::collections::VecDeque;
use tracing::debug;
use uuid::Uuid;

/// Convert a gloss sequence into queue entries
///
/// Marker tokens do not select assets:
/// - `MAINTAIN` marks the preceding sign as sustained (held after it completes)
/// - `SILENCE` becomes a rest
pub fn entries_from_sequence(sequence_id: Uuid, sequence: &GlossSequence) -> Vec<QueueEntry> {
    let mut entries: Vec<QueueEntry> = Vec::with_capacity(sequence.len());

    for token in sequence {
        match token {
            GlossToken::Marker { marker: Marker::Maintain } => {
                match entries.last_mut() {
                    Some(QueueEntry {
                        item: PlaybackItem::Sign { sustain, .. },
                        ..
                    }) => *sustain = true,
                    _ => debug!("MAINTAIN with no preceding sign, ignored"),
                }
            }
            GlossToken::Marker { marker: Marker::Silence } => entries.push(QueueEntry {
                sequence_id,
                item: PlaybackItem::Rest,
            }),
            token => entries.push(QueueEntry {
                sequence_id,
                item: PlaybackItem::Sign {
                    token: token.clone(),
                    sustain: false,
                },
            }),
        }
    }

    entries
}

/// FIFO of pending playback entries
#[derive(Debug, Default)]
pub struct PlaybackQueue {
    entries: VecDeque<QueueEntry>,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all pending entries, returning how many were discarded
    pub fn replace(&mut self, entries: Vec<QueueEntry>) -> usize {
        let discarded = self.entries.len();
        self.entries = entries.into();
        discarded
    }

    pub fn pop_front(&mut self) -> Option<QueueEntry> {
        self.entries.pop_front()
    }

    pub fn front(&self) -> Option<&QueueEntry> {
        self.entries.front()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels of pending entries, front first
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.item.label().to_string()).collect()
    }
}

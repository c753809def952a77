//! Animation playback
//!
//! The [`scheduler::PlaybackScheduler`] is a synchronous state machine
//! (Idle → Playing → Transitioning → Idle) fed by a [`queue::PlaybackQueue`].
//! [`engine::PlaybackEngine`] runs it on a tokio task and turns its actions
//! into asset loads and client events.

pub mod engine;
pub mod events;
pub mod fallback;
pub mod queue;
pub mod scheduler;
pub mod types;

pub use engine::PlaybackEngine;
pub use fallback::FallbackChain;
pub use queue::PlaybackQueue;
pub use scheduler::{PlaybackScheduler, SchedulerAction};
pub use types::{ActiveCue, CueInfo, LoadTicket, PlaybackState, PlaybackStatus, SchedulerConfig};

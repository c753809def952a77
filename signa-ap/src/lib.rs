//! # Signa Avatar Player Library (signa-ap)
//!
//! Turns transcribed speech into gloss sequences and schedules the matching
//! sign animations for a rendering client.
//!
//! **Architecture:** one engine task owns the playback scheduler; HTTP
//! handlers translate and submit, clients follow along over SSE.

pub mod api;
pub mod assets;
pub mod error;
pub mod playback;
pub mod state;
pub mod transcribe;

pub use error::{Error, Result};
pub use state::SharedState;

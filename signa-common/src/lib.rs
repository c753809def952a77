//! # Signa Common Library
//!
//! Shared code for the Signa services:
//! - Gloss Translation Engine (normalize, resolve, build)
//! - Event types (SignaEvent enum)
//! - Configuration loading
//! - Error types

pub mod config;
pub mod error;
pub mod events;
pub mod gloss;

pub use error::{Error, Result};
pub use gloss::{GlossDictionary, GlossSequence, GlossToken, GlossTranslator, Marker, Translation};

//! Gloss Translation Engine
//!
//! Turns free-form transcript text into an ordered sign gloss sequence:
//! - [`normalizer`]: lowercase, strip punctuation and fillers
//! - [`resolver`]: dictionary lookup with finger-spelling fallback
//! - [`builder`]: assemble token groups, SILENCE for empty utterances
//! - [`translator`]: the three steps behind one call

pub mod builder;
pub mod dictionary;
pub mod normalizer;
pub mod resolver;
pub mod token;
pub mod translator;

pub use builder::build_sequence;
pub use dictionary::GlossDictionary;
pub use normalizer::TextNormalizer;
pub use resolver::GlossResolver;
pub use token::{GlossSequence, GlossToken, Marker};
pub use translator::{GlossTranslator, Translation};

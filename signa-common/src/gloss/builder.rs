//! Gloss sequence assembly

use super::token::{GlossSequence, GlossToken};

/// Concatenate per-word token groups into one sequence
///
/// Zero groups (nothing signable was said) produce a sequence holding a single
/// SILENCE marker. No separators are inserted between groups.
pub fn build_sequence<I>(groups: I) -> GlossSequence
where
    I: IntoIterator<Item = Vec<GlossToken>>,
{
    let tokens: Vec<GlossToken> = groups.into_iter().flatten().collect();

    if tokens.is_empty() {
        GlossSequence::silence()
    } else {
        GlossSequence::new(tokens)
    }
}

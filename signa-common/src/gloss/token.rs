//! Gloss tokens and sequences
//!
//! A [`GlossToken`] is one unit of sign output. A [`GlossSequence`] is the
//! ordered list produced for a single utterance; insertion order is playback
//! order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-visual instruction carried in a gloss sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Marker {
    /// Nothing was said; shown as a rest
    Silence,
    /// Hold the last finger-spelled letter before moving on
    Maintain,
}

impl Marker {
    /// Literal label emitted in gloss output
    pub fn label(&self) -> &'static str {
        match self {
            Marker::Silence => "SILENCE",
            Marker::Maintain => "MAINTAIN",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Single unit of sign output
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GlossToken {
    /// Canonical gloss from the dictionary
    Word { label: String },

    /// One finger-spelled character, already uppercased
    Letter { letter: String },

    /// Sequence-level instruction (silence, sustain)
    Marker { marker: Marker },
}

impl GlossToken {
    pub fn word(label: impl Into<String>) -> Self {
        GlossToken::Word { label: label.into() }
    }

    /// Finger-spelled token for one character
    ///
    /// Uppercasing may expand a character (e.g. `ß` → `SS`); the token still
    /// stands for exactly one source character.
    pub fn letter(c: char) -> Self {
        GlossToken::Letter {
            letter: c.to_uppercase().collect(),
        }
    }

    pub fn marker(marker: Marker) -> Self {
        GlossToken::Marker { marker }
    }

    /// Output label of this token
    pub fn label(&self) -> &str {
        match self {
            GlossToken::Word { label } => label,
            GlossToken::Letter { letter } => letter,
            GlossToken::Marker { marker } => marker.label(),
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, GlossToken::Marker { .. })
    }

    pub fn as_marker(&self) -> Option<Marker> {
        match self {
            GlossToken::Marker { marker } => Some(*marker),
            _ => None,
        }
    }
}

impl fmt::Display for GlossToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered gloss output for one utterance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlossSequence {
    tokens: Vec<GlossToken>,
}

impl GlossSequence {
    pub fn new(tokens: Vec<GlossToken>) -> Self {
        Self { tokens }
    }

    /// Sequence representing an utterance with no signable words
    pub fn silence() -> Self {
        Self::new(vec![GlossToken::marker(Marker::Silence)])
    }

    pub fn tokens(&self) -> &[GlossToken] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GlossToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True when the sequence is exactly one SILENCE marker
    pub fn is_silence(&self) -> bool {
        matches!(
            self.tokens.as_slice(),
            [GlossToken::Marker { marker: Marker::Silence }]
        )
    }

    /// Plain-string labels in playback order
    pub fn labels(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.label().to_string()).collect()
    }
}

impl IntoIterator for GlossSequence {
    type Item = GlossToken;
    type IntoIter = std::vec::IntoIter<GlossToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a GlossSequence {
    type Item = &'a GlossToken;
    type IntoIter = std::slice::Iter<'a, GlossToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_labels() {
        assert_eq!(GlossToken::word("HELLO").label(), "HELLO");
        assert_eq!(GlossToken::letter('w').label(), "W");
        assert_eq!(GlossToken::marker(Marker::Maintain).label(), "MAINTAIN");
        assert_eq!(GlossToken::marker(Marker::Silence).to_string(), "SILENCE");
    }

    #[test]
    fn test_letter_uppercase_expansion() {
        // One source character, even when the uppercase form is longer
        assert_eq!(GlossToken::letter('ß').label(), "SS");
        assert_eq!(GlossToken::letter('7').label(), "7");
    }

    #[test]
    fn test_silence_sequence() {
        let seq = GlossSequence::silence();
        assert!(seq.is_silence());
        assert_eq!(seq.labels(), vec!["SILENCE"]);

        let seq = GlossSequence::new(vec![
            GlossToken::marker(Marker::Silence),
            GlossToken::word("HELLO"),
        ]);
        assert!(!seq.is_silence());
    }

    #[test]
    fn test_token_serialization() {
        let json = serde_json::to_string(&GlossToken::word("HELLO")).unwrap();
        assert_eq!(json, r#"{"kind":"word","label":"HELLO"}"#);

        let json = serde_json::to_string(&GlossToken::marker(Marker::Maintain)).unwrap();
        assert_eq!(json, r#"{"kind":"marker","marker":"MAINTAIN"}"#);
    }
}

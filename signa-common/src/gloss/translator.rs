//! Transcript → gloss translation pipeline
//!
//! Normalizer → Resolver → Builder, behind one entry point.

use super::builder::build_sequence;
use super::dictionary::GlossDictionary;
use super::normalizer::TextNormalizer;
use super::resolver::GlossResolver;
use super::token::GlossSequence;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Result of translating one utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    /// Normalized transcript, words joined by single spaces
    pub speech: String,
    /// Gloss tokens in playback order
    pub gloss: GlossSequence,
}

impl Translation {
    pub fn gloss_labels(&self) -> Vec<String> {
        self.gloss.labels()
    }
}

/// Stateless translator shared across requests
#[derive(Debug, Clone)]
pub struct GlossTranslator {
    normalizer: TextNormalizer,
    resolver: GlossResolver,
}

impl GlossTranslator {
    pub fn new(normalizer: TextNormalizer, resolver: GlossResolver) -> Self {
        Self { normalizer, resolver }
    }

    /// Translator with the default filler list and phrase length
    pub fn with_dictionary(dictionary: Arc<GlossDictionary>) -> Self {
        Self::new(TextNormalizer::default(), GlossResolver::new(dictionary))
    }

    pub fn translate(&self, text: &str) -> Translation {
        let words = self.normalizer.normalize(text);
        let gloss = build_sequence(self.resolver.resolve_words(&words));

        debug!("Translated {} words into {} gloss tokens", words.len(), gloss.len());

        Translation {
            speech: words.join(" "),
            gloss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> GlossTranslator {
        GlossTranslator::with_dictionary(Arc::new(GlossDictionary::from_pairs([
            ("hello", "HELLO"),
            ("thank you", "THANK_YOU"),
        ])))
    }

    #[test]
    fn test_hello_world() {
        let t = translator().translate("um hello world");
        assert_eq!(t.speech, "hello world");
        assert_eq!(t.gloss_labels(), vec!["HELLO", "W", "O", "R", "L", "D", "MAINTAIN"]);
    }

    #[test]
    fn test_empty_and_filler_only() {
        for text in ["", "   ", "um uh, er...", "you know"] {
            let t = translator().translate(text);
            assert_eq!(t.speech, "");
            assert_eq!(t.gloss_labels(), vec!["SILENCE"], "input {:?}", text);
        }
    }

    #[test]
    fn test_phrase_and_punctuation() {
        let t = translator().translate("Thank you, Hello!");
        assert_eq!(t.gloss_labels(), vec!["THANK_YOU", "HELLO"]);
    }
}

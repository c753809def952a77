//! Gloss resolution
//!
//! Resolves each normalized word to a dictionary gloss, or finger-spells it
//! when the dictionary has no entry. Resolution never fails.

use super::dictionary::GlossDictionary;
use super::token::{GlossToken, Marker};
use std::sync::Arc;
use tracing::debug;

/// Longest phrase tried before falling back to single words
pub const DEFAULT_MAX_PHRASE_WORDS: usize = 3;

/// Resolves words against a shared, read-only dictionary
#[derive(Debug, Clone)]
pub struct GlossResolver {
    dictionary: Arc<GlossDictionary>,
    max_phrase_words: usize,
}

impl GlossResolver {
    pub fn new(dictionary: Arc<GlossDictionary>) -> Self {
        Self::with_max_phrase_words(dictionary, DEFAULT_MAX_PHRASE_WORDS)
    }

    /// `max_phrase_words` below 1 is treated as 1 (single-word lookup only)
    pub fn with_max_phrase_words(dictionary: Arc<GlossDictionary>, max_phrase_words: usize) -> Self {
        Self {
            dictionary,
            max_phrase_words: max_phrase_words.max(1),
        }
    }

    pub fn dictionary(&self) -> &GlossDictionary {
        &self.dictionary
    }

    /// Resolve one word into its token group
    ///
    /// Hit: a single `Word` token. Miss: one `Letter` per character followed
    /// by a `Maintain` marker.
    pub fn resolve_word(&self, word: &str) -> Vec<GlossToken> {
        match self.dictionary.lookup(word) {
            Some(label) => vec![GlossToken::word(label)],
            None => {
                debug!("No gloss for {:?}, finger-spelling", word);
                finger_spell(word)
            }
        }
    }

    /// Resolve an ordered word list into one token group per lexical unit
    ///
    /// At each position the longest dictionary phrase (up to the configured
    /// word count) is taken first; otherwise the single word is resolved.
    pub fn resolve_words(&self, words: &[String]) -> Vec<Vec<GlossToken>> {
        let window = self
            .max_phrase_words
            .min(self.dictionary.longest_key_words())
            .max(1);

        let mut groups = Vec::with_capacity(words.len());
        let mut i = 0;

        while i < words.len() {
            let longest = window.min(words.len() - i);

            let phrase = (2..=longest).rev().find_map(|n| {
                let phrase = words[i..i + n].join(" ");
                self.dictionary.lookup(&phrase).map(|label| (n, label))
            });

            match phrase {
                Some((n, label)) => {
                    debug!("Matched {}-word phrase at {}: {}", n, i, label);
                    groups.push(vec![GlossToken::word(label)]);
                    i += n;
                }
                None => {
                    groups.push(self.resolve_word(&words[i]));
                    i += 1;
                }
            }
        }

        groups
    }
}

/// Finger-spell a word: one uppercase `Letter` per character, then `Maintain`
///
/// Whitespace is not a character of the word and is skipped.
pub fn finger_spell(word: &str) -> Vec<GlossToken> {
    word.chars()
        .filter(|c| !c.is_whitespace())
        .map(GlossToken::letter)
        .chain(std::iter::once(GlossToken::marker(Marker::Maintain)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(pairs: &[(&str, &str)]) -> GlossResolver {
        GlossResolver::new(Arc::new(GlossDictionary::from_pairs(pairs.iter().copied())))
    }

    fn labels(tokens: &[GlossToken]) -> Vec<&str> {
        tokens.iter().map(GlossToken::label).collect()
    }

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_dictionary_hit() {
        let r = resolver(&[("hello", "HELLO")]);
        assert_eq!(r.resolve_word("hello"), vec![GlossToken::word("HELLO")]);
    }

    #[test]
    fn test_dictionary_miss_finger_spells() {
        let r = resolver(&[("hello", "HELLO")]);
        let tokens = r.resolve_word("world");

        assert_eq!(labels(&tokens), vec!["W", "O", "R", "L", "D", "MAINTAIN"]);
        assert_eq!(tokens.iter().filter(|t| !t.is_marker()).count(), "world".len());
    }

    #[test]
    fn test_non_alphabetic_word_fails_soft() {
        let r = resolver(&[]);
        assert_eq!(labels(&r.resolve_word("42")), vec!["4", "2", "MAINTAIN"]);
        assert_eq!(labels(&r.resolve_word("")), vec!["MAINTAIN"]);
    }

    #[test]
    fn test_phrase_matching_prefers_longest() {
        let r = resolver(&[
            ("good", "GOOD"),
            ("good morning", "GOOD_MORNING"),
            ("see you later", "SEE_YOU_LATER"),
            ("you", "YOU"),
        ]);

        let groups = r.resolve_words(&words("good morning see you later you"));
        let flat: Vec<&str> = groups.iter().flat_map(|g| labels(g)).collect();
        assert_eq!(flat, vec!["GOOD_MORNING", "SEE_YOU_LATER", "YOU"]);
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_phrase_matching_disabled() {
        let dict = Arc::new(GlossDictionary::from_pairs([("good morning", "GOOD_MORNING"), ("good", "GOOD")]));
        let r = GlossResolver::with_max_phrase_words(dict, 1);

        let groups = r.resolve_words(&words("good morning"));
        assert_eq!(labels(&groups[0]), vec!["GOOD"]);
        assert_eq!(labels(&groups[1]), vec!["M", "O", "R", "N", "I", "N", "G", "MAINTAIN"]);
    }

    #[test]
    fn test_one_group_per_word_without_phrases() {
        let r = resolver(&[("hello", "HELLO")]);
        let groups = r.resolve_words(&words("hello hi hello"));
        assert_eq!(groups.len(), 3);
        assert_eq!(labels(&groups[1]), vec!["H", "I", "MAINTAIN"]);
    }
}

//! Text normalization for transcribed speech
//!
//! Lowercases, strips punctuation, splits on whitespace and removes filler
//! words. Fillers are matched as whole words only; a filler may span several
//! words (`"you know"`).

use tracing::trace;

/// Fillers removed when no explicit list is configured
pub const DEFAULT_FILLERS: &[&str] = &["um", "uh", "er", "ah", "hmm", "well", "like", "you know"];

/// Normalizes raw transcript text into signable words
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    /// Each filler pre-split into lowercase words, longest first
    fillers: Vec<Vec<String>>,
}

impl TextNormalizer {
    /// Create a normalizer with a custom filler list
    ///
    /// Filler entries are normalized the same way transcript text is, so
    /// `"You know,"` and `"you know"` are the same filler. Entries that
    /// normalize to nothing are ignored.
    pub fn new<I, S>(fillers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fillers: Vec<Vec<String>> = fillers
            .into_iter()
            .map(|f| split_words(&strip_punctuation(&f.as_ref().to_lowercase())))
            .filter(|words| !words.is_empty())
            .collect();

        fillers.sort_by(|a, b| b.len().cmp(&a.len()));
        fillers.dedup();

        Self { fillers }
    }

    /// Normalize transcript text into an ordered list of words
    ///
    /// Empty, whitespace-only, punctuation-only and filler-only input all
    /// yield an empty list.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let cleaned = strip_punctuation(&text.to_lowercase());
        let words = self.remove_fillers(split_words(&cleaned));
        trace!("Normalized {:?} -> {:?}", text, words);
        words
    }

    /// Normalize and join with single spaces
    pub fn normalize_to_string(&self, text: &str) -> String {
        self.normalize(text).join(" ")
    }

    /// Remove filler sequences so that none remains in the output
    ///
    /// Words are pushed one at a time; whenever the tail of the output ends
    /// with a filler, that tail is dropped. Removing a filler can only expose
    /// a prefix that was already filler-free, so a single pass is enough.
    fn remove_fillers(&self, words: Vec<String>) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(words.len());

        for word in words {
            out.push(word);
            if let Some(filler) = self.fillers.iter().find(|f| out.ends_with(f)) {
                let keep = out.len() - filler.len();
                out.truncate(keep);
            }
        }

        out
    }

    pub fn is_filler(&self, word: &str) -> bool {
        self.fillers
            .iter()
            .any(|f| f.len() == 1 && f[0] == word)
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_FILLERS)
    }
}

/// Punctuation is every character that is neither alphanumeric nor whitespace
pub fn is_punctuation(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace()
}

fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|&c| !is_punctuation(c)).collect()
}

fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

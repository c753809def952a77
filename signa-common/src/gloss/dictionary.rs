//! Gloss dictionary
//!
//! Immutable mapping from normalized word (or short phrase) to canonical gloss
//! label. Loaded once at startup from a JSON object of string pairs and
//! shared read-only afterwards.

use crate::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

/// Word/phrase → gloss label mapping
#[derive(Debug, Clone, Default)]
pub struct GlossDictionary {
    entries: HashMap<String, String>,
    /// Word count of the longest key
    longest_key_words: usize,
}

impl GlossDictionary {
    /// Build a dictionary from key/label pairs
    ///
    /// Keys are normalized (lowercased, whitespace collapsed). Entries whose
    /// key or label is blank are skipped. When two keys normalize to the same
    /// value the first one wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries = HashMap::new();
        let mut longest_key_words = 0;

        for (key, label) in pairs {
            let key = normalize_key(key.as_ref());
            let label = label.as_ref().trim();

            if key.is_empty() || label.is_empty() {
                warn!("Skipping blank gloss dictionary entry ({:?} -> {:?})", key, label);
                continue;
            }

            if entries.contains_key(&key) {
                warn!("Duplicate gloss dictionary key after normalization: {:?}", key);
                continue;
            }

            longest_key_words = longest_key_words.max(key.split(' ').count());
            entries.insert(key, label.to_string());
        }

        Self {
            entries,
            longest_key_words,
        }
    }

    /// Parse a JSON object of `"word": "GLOSS"` pairs
    pub fn from_json_str(json: &str) -> Result<Self> {
        // BTreeMap gives a deterministic order for duplicate resolution
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        Ok(Self::from_pairs(raw))
    }

    /// Load the dictionary file
    ///
    /// Failure here is fatal for startup; the error names the file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Dictionary {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let dictionary = Self::from_json_str(&content).map_err(|e| Error::Dictionary {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        info!(
            "Loaded {} gloss entries from {}",
            dictionary.len(),
            path.display()
        );

        Ok(dictionary)
    }

    /// Look up a word or phrase, ignoring case and surrounding/internal whitespace
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries.get(&normalize_key(word)).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup(word).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Word count of the longest phrase in the dictionary
    pub fn longest_key_words(&self) -> usize {
        self.longest_key_words
    }
}

fn normalize_key(key: &str) -> String {
    key.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

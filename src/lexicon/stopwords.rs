//! Stopword set.
//!
//! The built-in list is NLTK's English list, loaded from the `stop-words`
//! crate. Custom lists come from files or slices.

use crate::error::Result;
use std::collections::HashSet;
use std::path::Path;
use stop_words::{get, LANGUAGE};

/// A fixed set of uninformative tokens. Membership test only.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordSet {
    /// The built-in English list.
    pub fn english() -> Self {
        Self {
            words: get(LANGUAGE::English)
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
        }
    }

    /// Builds a set from a custom list. Words are lowercased.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        Self {
            words: words.iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// Loads a set from a file with one word per line.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = crate::error::read_lexicon_file(path)?;
        let words: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();
        Ok(Self::from_words(&words))
    }

    /// Whether `word` is a stopword. Case-sensitive against the lowercase set.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

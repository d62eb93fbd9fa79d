//! Contraction expansion table.

use std::collections::HashMap;

/// Lowercase contracted token -> expansion phrase.
///
/// Some expansions start with an uppercase `I` and two start with a space
/// (`'re`, `we'll`). Both are kept as-is; the pipeline re-tokenizes and
/// lowercases after expansion.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("aren't", "are not"),
    ("can't", "cannot"),
    ("couldn't", "could not"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he'd", "he would"),
    ("he'll", "he will"),
    ("he's", "he is"),
    ("i'd", "I would"),
    ("i'll", "I will"),
    ("i'm", "I am"),
    ("isn't", "is not"),
    ("it's", "it is"),
    ("it'll", "it will"),
    ("i've", "I have"),
    ("let's", "let us"),
    ("mightn't", "might not"),
    ("mustn't", "must not"),
    ("shan't", "shall not"),
    ("she'd", "she would"),
    ("she'll", "she will"),
    ("she's", "she is"),
    ("shouldn't", "should not"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("they'd", "they would"),
    ("they'll", "they will"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("we'd", "we would"),
    ("we're", "we are"),
    ("weren't", "were not"),
    ("we've", "we have"),
    ("what'll", "what will"),
    ("what're", "what are"),
    ("what's", "what is"),
    ("what've", "what have"),
    ("where's", "where is"),
    ("who'd", "who would"),
    ("who'll", "who will"),
    ("who're", "who are"),
    ("who's", "who is"),
    ("who've", "who have"),
    ("won't", "will not"),
    ("wouldn't", "would not"),
    ("you'd", "you would"),
    ("you'll", "you will"),
    ("you're", "you are"),
    ("you've", "you have"),
    ("'re", " are"),
    ("wasn't", "was not"),
    ("we'll", " will"),
];

/// Exact-match contraction lookup.
#[derive(Debug, Clone)]
pub struct ContractionMap {
    entries: HashMap<&'static str, &'static str>,
}

impl Default for ContractionMap {
    fn default() -> Self {
        Self::english()
    }
}

impl ContractionMap {
    /// The built-in English table.
    pub fn english() -> Self {
        Self {
            entries: CONTRACTIONS.iter().copied().collect(),
        }
    }

    /// Looks up a token. Case-sensitive; callers pass lowercased text.
    pub fn get(&self, token: &str) -> Option<&'static str> {
        self.entries.get(token).copied()
    }

    /// Expands a token, or returns it unchanged when it is not a contraction.
    pub fn expand<'a>(&self, token: &'a str) -> &'a str {
        self.get(token).unwrap_or(token)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(contraction, expansion)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}

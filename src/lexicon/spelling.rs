//! Spelling correction and compound segmentation.
//!
//! [`SpellCorrector`] is the capability the pipeline consumes. [`SymSpell`]
//! implements it with the symmetric-delete algorithm: every dictionary term is
//! indexed under all strings reachable by deleting up to `max_edit_distance`
//! characters from its prefix, so a lookup only needs to generate deletes of
//! the input and verify the hits with a real edit distance.

use crate::error::{Result, TweetNormError};
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Instant;

/// A candidate correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The dictionary term.
    pub term: String,
    /// Edit distance from the input.
    pub distance: usize,
    /// Corpus frequency of the term.
    pub count: u64,
}

/// Spelling correction capability.
pub trait SpellCorrector: Send + Sync {
    /// Splits a concatenated compound into its most probable space-separated
    /// word sequence, correcting the parts on the way.
    fn segment(&self, token: &str) -> String;

    /// Candidate corrections within `max_edit_distance`, best first.
    ///
    /// Returns an empty list when nothing is close enough.
    fn suggest(&self, token: &str, max_edit_distance: usize) -> Vec<Suggestion>;
}

/// Symmetric-delete spell corrector over a term frequency dictionary.
#[derive(Debug, Clone)]
pub struct SymSpell {
    max_dictionary_edit_distance: usize,
    prefix_length: usize,
    words: HashMap<String, u64>,
    deletes: HashMap<String, Vec<String>>,
    max_length: usize,
    total_count: u64,
}

impl SymSpell {
    /// Creates an empty corrector.
    pub fn new(max_dictionary_edit_distance: usize, prefix_length: usize) -> Self {
        Self {
            max_dictionary_edit_distance,
            prefix_length: prefix_length.max(1),
            words: HashMap::new(),
            deletes: HashMap::new(),
            max_length: 0,
            total_count: 0,
        }
    }

    /// Builds a corrector from `(term, count)` pairs.
    pub fn from_entries<I, S>(
        entries: I,
        max_dictionary_edit_distance: usize,
        prefix_length: usize,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut speller = Self::new(max_dictionary_edit_distance, prefix_length);
        for (term, count) in entries {
            speller.add_entry(term.as_ref(), count);
        }
        if speller.is_empty() {
            return Err(TweetNormError::EmptyInput(
                "spelling dictionary has no entries".to_string(),
            ));
        }
        Ok(speller)
    }

    /// Loads a frequency dictionary with one `term count` pair per line.
    pub fn load_dictionary(
        path: &Path,
        max_dictionary_edit_distance: usize,
        prefix_length: usize,
    ) -> Result<Self> {
        let start = Instant::now();
        let content = crate::error::read_lexicon_file(path)?;

        let mut entries = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let mut fields = line.split_whitespace();
            let (term, count) = match (fields.next(), fields.next()) {
                (Some(term), Some(count)) => (term, count),
                (None, _) => continue,
                (Some(term), None) => {
                    warn!("{}:{}: no count for '{}', skipping", path.display(), idx + 1, term);
                    continue;
                }
            };
            let count: u64 = count.parse().map_err(|_| TweetNormError::InvalidLexicon {
                path: path.to_path_buf(),
                line: idx + 1,
                reason: format!("invalid count '{}'", count),
            })?;
            entries.push((term.to_string(), count));
        }

        let speller = Self::from_entries(entries, max_dictionary_edit_distance, prefix_length)?;
        info!(
            "Loaded spelling dictionary {}: {} terms, {} deletes in {:.2?}",
            path.display(),
            speller.len(),
            speller.deletes.len(),
            start.elapsed()
        );
        Ok(speller)
    }

    /// Adds a term, accumulating counts for repeated terms.
    pub fn add_entry(&mut self, term: &str, count: u64) {
        if term.is_empty() || count == 0 {
            return;
        }

        let entry = self.words.entry(term.to_string()).or_insert(0);
        let is_new = *entry == 0;
        *entry = entry.saturating_add(count);
        self.total_count = self.total_count.saturating_add(count);
        if !is_new {
            return;
        }

        let len = term.chars().count();
        self.max_length = self.max_length.max(len);

        let prefix: String = term.chars().take(self.prefix_length).collect();
        for delete in edits(&prefix, self.max_dictionary_edit_distance) {
            self.deletes.entry(delete).or_default().push(term.to_string());
        }
    }

    /// Number of dictionary terms.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Frequency of `term`, if it is in the dictionary.
    pub fn count(&self, term: &str) -> Option<u64> {
        self.words.get(term).copied()
    }

    /// Largest edit distance the index supports.
    pub fn max_dictionary_edit_distance(&self) -> usize {
        self.max_dictionary_edit_distance
    }

    fn lookup(&self, input: &str, max_edit_distance: usize) -> Vec<Suggestion> {
        let max_edit_distance = max_edit_distance.min(self.max_dictionary_edit_distance);
        let input_len = input.chars().count();
        if input_len == 0 {
            return Vec::new();
        }

        if let Some(&count) = self.words.get(input) {
            return vec![Suggestion {
                term: input.to_string(),
                distance: 0,
                count,
            }];
        }
        if max_edit_distance == 0 || input_len > self.max_length + max_edit_distance {
            return Vec::new();
        }

        let input_chars: Vec<char> = input.chars().collect();
        let prefix: String = input_chars.iter().take(self.prefix_length).collect();

        let mut checked = HashSet::new();
        let mut suggestions = Vec::new();
        for candidate in edits(&prefix, max_edit_distance) {
            let Some(terms) = self.deletes.get(&candidate) else {
                continue;
            };
            for term in terms {
                if !checked.insert(term.as_str()) {
                    continue;
                }
                let term_chars: Vec<char> = term.chars().collect();
                if term_chars.len().abs_diff(input_len) > max_edit_distance {
                    continue;
                }
                let distance = osa_distance(&input_chars, &term_chars);
                if distance <= max_edit_distance {
                    suggestions.push(Suggestion {
                        term: term.clone(),
                        distance,
                        count: self.words[term],
                    });
                }
            }
        }

        suggestions.sort_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then(b.count.cmp(&a.count))
                .then_with(|| a.term.cmp(&b.term))
        });
        suggestions
    }

    fn log_probability(&self, count: u64) -> f64 {
        (count as f64 / self.total_count.max(1) as f64).log10()
    }

    /// Scores one segmentation part: corrected text, edit distance, log probability.
    fn score_part(&self, part: &str, part_len: usize) -> (String, usize, f64) {
        match self.lookup(part, self.max_dictionary_edit_distance).into_iter().next() {
            Some(best) => {
                let log_prob = self.log_probability(best.count);
                (best.term, best.distance, log_prob)
            }
            // Unknown words: probability falls off with length.
            None => {
                let log_prob = (10.0 / self.total_count.max(1) as f64).log10() - part_len as f64;
                (part.to_string(), part_len, log_prob)
            }
        }
    }
}

/// Best segmentation of a text prefix.
#[derive(Debug, Clone)]
struct Composition {
    parts: Vec<String>,
    distance: usize,
    log_prob: f64,
}

impl Composition {
    fn beats(&self, other: &Composition) -> bool {
        self.distance < other.distance
            || (self.distance == other.distance && self.log_prob > other.log_prob)
    }
}

impl SpellCorrector for SymSpell {
    fn segment(&self, token: &str) -> String {
        let chars: Vec<char> = token.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.is_empty() {
            return String::new();
        }

        let window = self.max_length.max(1);
        let mut best: Vec<Option<Composition>> = vec![None; chars.len() + 1];
        best[0] = Some(Composition {
            parts: Vec::new(),
            distance: 0,
            log_prob: 0.0,
        });

        for end in 1..=chars.len() {
            for start in end.saturating_sub(window)..end {
                let Some(prev) = &best[start] else {
                    continue;
                };
                let part: String = chars[start..end].iter().collect();
                let (term, distance, log_prob) = self.score_part(&part, end - start);
                let separator = usize::from(start > 0);

                let mut parts = prev.parts.clone();
                parts.push(term);
                let candidate = Composition {
                    parts,
                    distance: prev.distance + separator + distance,
                    log_prob: prev.log_prob + log_prob,
                };
                if best[end].as_ref().map_or(true, |current| candidate.beats(current)) {
                    best[end] = Some(candidate);
                }
            }
        }

        best[chars.len()]
            .take()
            .map(|composition| composition.parts.join(" "))
            .unwrap_or_else(|| token.to_string())
    }

    fn suggest(&self, token: &str, max_edit_distance: usize) -> Vec<Suggestion> {
        self.lookup(token, max_edit_distance)
    }
}

/// All strings reachable from `word` by deleting up to `max_distance`
/// characters, including `word` itself. Words no longer than `max_distance`
/// also reach the empty string.
fn edits(word: &str, max_distance: usize) -> HashSet<String> {
    let mut result = HashSet::new();
    result.insert(word.to_string());
    if word.chars().count() <= max_distance {
        result.insert(String::new());
    }

    let mut frontier = vec![word.chars().collect::<Vec<char>>()];
    for _ in 0..max_distance {
        let mut next = Vec::new();
        for chars in &frontier {
            if chars.len() <= 1 {
                continue;
            }
            for i in 0..chars.len() {
                let mut shorter = chars.clone();
                shorter.remove(i);
                if result.insert(shorter.iter().collect()) {
                    next.push(shorter);
                }
            }
        }
        frontier = next;
    }

    result
}

/// Restricted Damerau-Levenshtein (optimal string alignment) distance.
fn osa_distance(a: &[char], b: &[char]) -> usize {
    let (n, m) = (a.len(), b.len());
    let mut d = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        d[0][j] = j;
    }

    for i in 1..=n {
        for j in 1..=m {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut value = (d[i - 1][j] + 1)
                .min(d[i][j - 1] + 1)
                .min(d[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                value = value.min(d[i - 2][j - 2] + 1);
            }
            d[i][j] = value;
        }
    }

    d[n][m]
}

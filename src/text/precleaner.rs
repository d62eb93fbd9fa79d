//! Batch pre-cleaner.
//!
//! A light regex pass run over whole collections before the main pipeline:
//! drops a leading `RT`, `@mentions`, bare URLs and every character that is
//! not an ASCII letter or whitespace, then collapses whitespace. Case is left
//! alone.

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;

static PRECLEAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(@[A-Za-z0-9]+)|^(?i:rt) |(\w+:/*\S+)|[^a-zA-Z\s]").unwrap()
});

/// Pre-cleans a single string.
pub fn preclean(text: &str) -> String {
    let stripped = PRECLEAN.replace_all(text, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pre-cleans every string in parallel. Output order and length match the input.
pub fn process_tweets<S>(texts: &[S]) -> Vec<String>
where
    S: AsRef<str> + Sync,
{
    texts.par_iter().map(|text| preclean(text.as_ref())).collect()
}

/// Like [`process_tweets`], mapping absent entries to empty strings.
pub fn process_optional_tweets<S>(texts: &[Option<S>]) -> Vec<String>
where
    S: AsRef<str> + Sync,
{
    texts
        .par_iter()
        .map(|text| text.as_ref().map(|t| preclean(t.as_ref())).unwrap_or_default())
        .collect()
}

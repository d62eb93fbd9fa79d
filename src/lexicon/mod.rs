//! Lexical resources shared read-only by every pipeline invocation.
//!
//! A [`Lexicon`] is built once at startup. Loading may fail (missing or
//! malformed files); once built it is immutable and can be shared across
//! threads by reference.

mod contractions;
mod lemmatizer;
mod spelling;
mod stopwords;

pub use contractions::ContractionMap;
pub use lemmatizer::{Lemmatizer, MorphyLemmatizer};
pub use spelling::{SpellCorrector, Suggestion, SymSpell};
pub use stopwords::StopwordSet;

use crate::config::LexiconConfig;
use crate::error::Result;
use log::info;
use std::time::Instant;

/// Bundle of lexical resources consumed by the normalization pipeline.
pub struct Lexicon {
    contractions: ContractionMap,
    stopwords: StopwordSet,
    lemmatizer: Box<dyn Lemmatizer>,
    spell_corrector: Option<Box<dyn SpellCorrector>>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::english()
    }
}

impl std::fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexicon")
            .field("contractions", &self.contractions.len())
            .field("stopwords", &self.stopwords.len())
            .field("spell_corrector", &self.spell_corrector.is_some())
            .finish()
    }
}

impl Lexicon {
    /// Built-in English tables, no spell corrector.
    pub fn english() -> Self {
        Self {
            contractions: ContractionMap::english(),
            stopwords: StopwordSet::english(),
            lemmatizer: Box::new(MorphyLemmatizer::english()),
            spell_corrector: None,
        }
    }

    /// Assembles a lexicon from explicit parts.
    pub fn new(
        contractions: ContractionMap,
        stopwords: StopwordSet,
        lemmatizer: Box<dyn Lemmatizer>,
        spell_corrector: Option<Box<dyn SpellCorrector>>,
    ) -> Self {
        Self {
            contractions,
            stopwords,
            lemmatizer,
            spell_corrector,
        }
    }

    /// Loads every resource named in `config`, falling back to the built-in
    /// tables for anything left unset.
    ///
    /// Fails on the first missing or malformed file.
    pub fn load(config: &LexiconConfig) -> Result<Self> {
        config.validate()?;
        let start = Instant::now();

        let stopwords = match &config.stopwords_path {
            Some(path) => StopwordSet::from_file(path)?,
            None => StopwordSet::english(),
        };

        let lemmatizer = match &config.verbs_path {
            Some(path) => {
                MorphyLemmatizer::from_files(path, config.verb_exceptions_path.as_deref())?
            }
            None => MorphyLemmatizer::english(),
        };

        let spell_corrector = match &config.dictionary_path {
            Some(path) => Some(Box::new(SymSpell::load_dictionary(
                path,
                config.max_dictionary_edit_distance,
                config.prefix_length,
            )?) as Box<dyn SpellCorrector>),
            None => None,
        };

        let lexicon = Self::new(
            ContractionMap::english(),
            stopwords,
            Box::new(lemmatizer),
            spell_corrector,
        );
        info!("Loaded lexicon {:?} in {:.2?}", lexicon, start.elapsed());
        Ok(lexicon)
    }

    /// Replaces the spell corrector.
    pub fn with_spell_corrector(mut self, corrector: impl SpellCorrector + 'static) -> Self {
        self.spell_corrector = Some(Box::new(corrector));
        self
    }

    /// Drops the spell corrector, disabling segmentation and correction.
    pub fn without_spell_corrector(mut self) -> Self {
        self.spell_corrector = None;
        self
    }

    /// Contraction table.
    pub fn contractions(&self) -> &ContractionMap {
        &self.contractions
    }

    /// Stopword set.
    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Verb lemmatizer.
    pub fn lemmatizer(&self) -> &dyn Lemmatizer {
        self.lemmatizer.as_ref()
    }

    /// Spell corrector, if one was supplied.
    pub fn spell_corrector(&self) -> Option<&dyn SpellCorrector> {
        self.spell_corrector.as_deref()
    }
}

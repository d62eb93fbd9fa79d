//! # tweetnorm - Tweet Normalization Pipeline
//!
//! tweetnorm turns raw, noisy tweets into canonical, lowercase,
//! whitespace-separated token strings suitable as input to text classifiers.
//!
//! ## Overview
//!
//! Each tweet goes through a fixed sequence of stages, most of which can be
//! toggled through [`PipelineConfig`]:
//!
//! - **Masking** of mentions and links, or their removal
//! - **Character normalization** through an ordered regex substitution table
//! - **Emoji textualization** (`🔥` becomes `fire`)
//! - **Tokenization** tuned for tweets (emoticons, handles, hashtags)
//! - **Lexical normalization**: contractions, verb lemmas, stopwords,
//!   elongated words, compound splitting and spelling correction
//!
//! A separate batch pre-cleaner ([`process_tweets`]) strips retweet markers,
//! mentions, links and every non-letter character from whole collections.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tweetnorm::{Lexicon, Normalizer, PipelineConfig};
//!
//! let lexicon = Lexicon::english();
//! let normalizer = Normalizer::new(PipelineConfig::default(), &lexicon);
//!
//! let clean = normalizer.normalize("@USER can't believe this!!! #fail");
//! assert_eq!(clean, "usertoken cannot believe");
//! ```
//!
//! ## Spelling Correction
//!
//! Compound segmentation and spelling correction need a term-frequency
//! dictionary. Without one, those two stages are skipped.
//!
//! ```rust,ignore
//! use tweetnorm::{Lexicon, LexiconConfig};
//!
//! let config = LexiconConfig {
//!     dictionary_path: Some("frequency_dictionary_en_82_765.txt".into()),
//!     ..Default::default()
//! };
//! let lexicon = Lexicon::load(&config)?;
//! ```
//!
//! ## Architecture
//!
//! - [`text`] - Tokenizer, substitution rules, emoji handling, the pipeline
//!   and the batch pre-cleaner
//! - [`lexicon`] - Contractions, stopwords, lemmatizer and spell corrector
//! - [`config`] - Stage toggles and resource locations
//! - [`error`] - Error type for resource and configuration loading

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod lexicon;
pub mod text;

// Re-export commonly used types
pub use config::{Config, LexiconConfig, MaskMode, PipelineConfig};
pub use error::{Result, TweetNormError};
pub use lexicon::{
    ContractionMap, Lemmatizer, Lexicon, MorphyLemmatizer, SpellCorrector, StopwordSet,
    Suggestion, SymSpell,
};
pub use text::{
    demojize, preclean, process_optional_tweets, process_tweet, process_tweets, Normalizer,
    Token, TweetTokenizer,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

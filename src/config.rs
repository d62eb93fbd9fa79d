//! Configuration for the tweet normalization pipeline.

use crate::error::{Result, TweetNormError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration: which stages run, and where lexical resources come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Stage toggles for the normalization pipeline.
    pub pipeline: PipelineConfig,

    /// Lexical resource locations.
    pub lexicon: LexiconConfig,
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// Missing sections and fields fall back to their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = crate::error::read_lexicon_file(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}

/// How mentions and links are recognised in stage 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskMode {
    /// Detect `@word` handles and `http…` links with regexes.
    Trial,
    /// The dataset already replaced them with literal `@USER` and `URL`.
    #[default]
    Production,
}

/// Stage toggles for the normalization pipeline.
///
/// Built once per call site and never mutated while a text is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Mention/URL detection convention.
    /// Default: production.
    pub mask_mode: MaskMode,

    /// Delete mentions and links instead of replacing them with
    /// `<usertoken>` / `<urltoken>`.
    /// Default: false.
    pub remove_user_url: bool,

    /// Delete `#hashtag` sequences.
    /// Default: true.
    pub remove_hashtags: bool,

    /// Delete ASCII punctuation except the apostrophe.
    /// Default: true.
    pub remove_punctuation: bool,

    /// Expand contractions (`don't` -> `do not`).
    /// Default: true.
    pub expand_contractions: bool,

    /// Reduce every token to its base verb form.
    /// Default: true.
    pub lemmatize: bool,

    /// Drop stopwords.
    /// Default: true.
    pub remove_stopwords: bool,

    /// Collapse runs of three or more identical characters to two.
    /// Default: true.
    pub reduce_lengthenings: bool,

    /// Split concatenated compounds. Needs a spell corrector.
    /// Default: true.
    pub segment_words: bool,

    /// Replace tokens with their closest dictionary word. Needs a spell corrector.
    /// Default: true.
    pub correct_spelling: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mask_mode: MaskMode::Production,
            remove_user_url: false,
            remove_hashtags: true,
            remove_punctuation: true,
            expand_contractions: true,
            lemmatize: true,
            remove_stopwords: true,
            reduce_lengthenings: true,
            segment_words: true,
            correct_spelling: true,
        }
    }
}

impl PipelineConfig {
    /// Only the mandatory stages: masking (with placeholders), lowercasing,
    /// character normalization, emoji textualization, tokenization, assembly.
    pub fn minimal() -> Self {
        Self {
            mask_mode: MaskMode::Production,
            remove_user_url: false,
            remove_hashtags: false,
            remove_punctuation: false,
            expand_contractions: false,
            lemmatize: false,
            remove_stopwords: false,
            reduce_lengthenings: false,
            segment_words: false,
            correct_spelling: false,
        }
    }

    /// Sets the mask mode.
    pub fn with_mask_mode(mut self, mode: MaskMode) -> Self {
        self.mask_mode = mode;
        self
    }

    /// Sets whether mentions/links are deleted rather than replaced.
    pub fn with_remove_user_url(mut self, enabled: bool) -> Self {
        self.remove_user_url = enabled;
        self
    }

    /// Sets hashtag removal.
    pub fn with_remove_hashtags(mut self, enabled: bool) -> Self {
        self.remove_hashtags = enabled;
        self
    }

    /// Sets punctuation removal.
    pub fn with_remove_punctuation(mut self, enabled: bool) -> Self {
        self.remove_punctuation = enabled;
        self
    }

    /// Sets contraction expansion.
    pub fn with_expand_contractions(mut self, enabled: bool) -> Self {
        self.expand_contractions = enabled;
        self
    }

    /// Sets lemmatization.
    pub fn with_lemmatize(mut self, enabled: bool) -> Self {
        self.lemmatize = enabled;
        self
    }

    /// Sets stopword removal.
    pub fn with_remove_stopwords(mut self, enabled: bool) -> Self {
        self.remove_stopwords = enabled;
        self
    }

    /// Sets lengthening reduction.
    pub fn with_reduce_lengthenings(mut self, enabled: bool) -> Self {
        self.reduce_lengthenings = enabled;
        self
    }

    /// Sets compound segmentation.
    pub fn with_segment_words(mut self, enabled: bool) -> Self {
        self.segment_words = enabled;
        self
    }

    /// Sets spelling correction.
    pub fn with_correct_spelling(mut self, enabled: bool) -> Self {
        self.correct_spelling = enabled;
        self
    }
}

/// Where lexical resources are loaded from.
///
/// Every path is optional; absent paths select the built-in English tables,
/// except `dictionary_path`, whose absence disables the spell corrector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Stopword list, one word per line.
    pub stopwords_path: Option<PathBuf>,

    /// Base verb list for the lemmatizer, one verb per line.
    pub verbs_path: Option<PathBuf>,

    /// Irregular verb exceptions, `inflected base [base...]` per line.
    pub verb_exceptions_path: Option<PathBuf>,

    /// Term frequency dictionary (`term count` per line) for the spell corrector.
    pub dictionary_path: Option<PathBuf>,

    /// Largest edit distance the spell corrector indexes.
    /// Default: 2.
    pub max_dictionary_edit_distance: usize,

    /// Prefix length used when generating deletes.
    /// Default: 7.
    pub prefix_length: usize,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            stopwords_path: None,
            verbs_path: None,
            verb_exceptions_path: None,
            dictionary_path: None,
            max_dictionary_edit_distance: 2,
            prefix_length: 7,
        }
    }
}

impl LexiconConfig {
    /// Checks the spell corrector parameters.
    ///
    /// Deletes are generated from the first `prefix_length` characters, so the
    /// prefix has to be longer than the largest edit distance.
    pub fn validate(&self) -> Result<()> {
        if self.prefix_length == 0 {
            return Err(TweetNormError::Config(
                "prefix_length must be at least 1".to_string(),
            ));
        }
        if self.prefix_length <= self.max_dictionary_edit_distance {
            return Err(TweetNormError::Config(format!(
                "prefix_length ({}) must exceed max_dictionary_edit_distance ({})",
                self.prefix_length, self.max_dictionary_edit_distance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.mask_mode, MaskMode::Production);
        assert!(!config.remove_user_url);
        assert!(config.remove_stopwords);
        assert!(config.correct_spelling);
    }

    #[test]
    fn test_minimal_config() {
        let config = PipelineConfig::minimal();
        assert!(!config.remove_hashtags);
        assert!(!config.lemmatize);
        assert!(!config.segment_words);
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::minimal()
            .with_mask_mode(MaskMode::Trial)
            .with_remove_stopwords(true);
        assert_eq!(config.mask_mode, MaskMode::Trial);
        assert!(config.remove_stopwords);
        assert!(!config.remove_punctuation);
    }

    #[test]
    fn test_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"pipeline": {{"mask_mode": "trial", "lemmatize": false}}, "lexicon": {{"prefix_length": 5}}}}"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.pipeline.mask_mode, MaskMode::Trial);
        assert!(!config.pipeline.lemmatize);
        assert!(config.pipeline.remove_hashtags);
        assert_eq!(config.lexicon.prefix_length, 5);
        assert_eq!(config.lexicon.max_dictionary_edit_distance, 2);
    }

    #[test]
    fn test_lexicon_validation() {
        assert!(LexiconConfig::default().validate().is_ok());

        let config = LexiconConfig {
            prefix_length: 2,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TweetNormError::Config(_))));

        let config = LexiconConfig {
            prefix_length: 0,
            max_dictionary_edit_distance: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }
}

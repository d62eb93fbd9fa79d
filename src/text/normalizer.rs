//! The per-text normalization pipeline.
//!
//! Stages run in a fixed order, each on the output of the previous enabled
//! stage:
//!
//! 1. mention/URL masking (trial or production convention)
//! 2. hashtag stripping (optional)
//! 3. lowercasing
//! 4. character normalization ([`crate::text::rules`])
//! 5. emoji textualization
//! 6. punctuation removal (optional)
//! 7. tokenization
//! 8. contraction expansion (optional), then re-tokenization
//! 9. verb lemmatization (optional)
//! 10. stopword removal (optional)
//! 11. lengthening reduction (optional)
//! 12. compound segmentation (optional, needs a spell corrector)
//! 13. spelling correction (optional, needs a spell corrector)
//! 14. final assembly: space-join and lowercase
//!
//! Stages 12 and 13 are skipped when the lexicon carries no spell corrector,
//! whatever their flags say.

use crate::config::{MaskMode, PipelineConfig};
use crate::lexicon::{Lexicon, SpellCorrector};
use crate::text::emoji::demojize;
use crate::text::rules::normalize_characters;
use crate::text::tokenizer::TweetTokenizer;
use log::debug;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;

/// Edit distance budget for spelling correction.
pub const SPELLING_MAX_EDIT_DISTANCE: usize = 2;

/// Mention marker left by production datasets.
pub const USER_MARKER: &str = "@USER";

/// Link marker left by production datasets.
pub const URL_MARKER: &str = "URL";

/// Placeholder for a masked mention.
pub const USER_TOKEN: &str = "<usertoken>";

/// Placeholder for a masked link.
pub const URL_TOKEN: &str = "<urltoken>";

static TRIAL_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+ ?").unwrap());
static TRIAL_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+").unwrap());
static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+ ?").unwrap());

/// Normalizes tweets against a shared, read-only [`Lexicon`].
#[derive(Debug, Clone)]
pub struct Normalizer<'a> {
    config: PipelineConfig,
    lexicon: &'a Lexicon,
    tokenizer: TweetTokenizer,
}

impl<'a> Normalizer<'a> {
    /// Creates a normalizer with the given configuration.
    pub fn new(config: PipelineConfig, lexicon: &'a Lexicon) -> Self {
        Self {
            config,
            lexicon,
            tokenizer: TweetTokenizer::new(),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the full pipeline on one text.
    pub fn normalize(&self, text: &str) -> String {
        let config = &self.config;

        let mut tweet =
            mask_mentions_and_urls(text, config.mask_mode, config.remove_user_url);
        if config.remove_hashtags {
            tweet = strip_hashtags(&tweet);
        }
        tweet = tweet.to_lowercase();
        tweet = normalize_characters(&tweet);
        tweet = demojize(&tweet);
        if config.remove_punctuation {
            tweet = remove_punctuation(&tweet);
        }

        let mut words = self.tokenizer.tokenize_to_strings(&tweet);

        if config.expand_contractions {
            let contractions = self.lexicon.contractions();
            words = words
                .iter()
                .map(|word| contractions.expand(word).to_string())
                .collect();
        }
        // Expansions are multi-word phrases; split them into separate tokens.
        words = self.tokenizer.tokenize_to_strings(&words.join(" "));

        if config.lemmatize {
            let lemmatizer = self.lexicon.lemmatizer();
            words = words
                .iter()
                .map(|word| lemmatizer.lemmatize_verb(word))
                .collect();
        }

        if config.remove_stopwords {
            let stopwords = self.lexicon.stopwords();
            words.retain(|word| !stopwords.contains(word));
        }

        if config.reduce_lengthenings {
            words = words.iter().map(|word| reduce_lengthening(word)).collect();
        }

        match self.lexicon.spell_corrector() {
            Some(speller) => {
                if config.segment_words {
                    words = segment_words(speller, &words);
                }
                if config.correct_spelling {
                    words = correct_spelling(speller, &words);
                }
            }
            None if config.segment_words || config.correct_spelling => {
                debug!("No spell corrector loaded, skipping segmentation and correction");
            }
            None => {}
        }

        words.join(" ").split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
    }

    /// Normalizes many texts in parallel. Output order and length match the input.
    pub fn normalize_batch<S>(&self, texts: &[S]) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.normalize(text.as_ref()))
            .collect()
    }
}

/// Normalizes one text with the given configuration and lexicon.
pub fn process_tweet(text: &str, config: &PipelineConfig, lexicon: &Lexicon) -> String {
    Normalizer::new(*config, lexicon).normalize(text)
}

/// Stage 1: deletes mentions and links, or swaps them for placeholders.
pub fn mask_mentions_and_urls(text: &str, mode: MaskMode, remove: bool) -> String {
    match (mode, remove) {
        (MaskMode::Trial, true) => {
            let text = TRIAL_MENTION.replace_all(text, "");
            TRIAL_URL.replace_all(&text, "").into_owned()
        }
        (MaskMode::Trial, false) => {
            let text = TRIAL_MENTION.replace_all(text, "<usertoken> ");
            TRIAL_URL.replace_all(&text, "<urltoken> ").into_owned()
        }
        (MaskMode::Production, true) => text.replace(USER_MARKER, "").replace(URL_MARKER, ""),
        (MaskMode::Production, false) => text
            .replace(USER_MARKER, USER_TOKEN)
            .replace(URL_MARKER, URL_TOKEN),
    }
}

/// Stage 2: deletes `#hashtag` sequences along with one trailing space.
pub fn strip_hashtags(text: &str) -> String {
    HASHTAG.replace_all(text, "").into_owned()
}

/// Stage 6: deletes ASCII punctuation, keeping apostrophes.
pub fn remove_punctuation(text: &str) -> String {
    text.chars()
        .filter(|&c| !c.is_ascii_punctuation() || c == '\'')
        .collect()
}

/// Stage 11: collapses runs of three or more identical characters to two.
pub fn reduce_lengthening(word: &str) -> String {
    let mut result = String::with_capacity(word.len());
    let mut previous: Option<char> = None;
    let mut run = 0;

    for ch in word.chars() {
        if Some(ch) == previous {
            run += 1;
        } else {
            previous = Some(ch);
            run = 1;
        }
        if run <= 2 {
            result.push(ch);
        }
    }

    result
}

/// Stage 12: segments every token; one token may become several.
fn segment_words(speller: &dyn SpellCorrector, words: &[String]) -> Vec<String> {
    words
        .iter()
        .flat_map(|word| {
            speller
                .segment(word)
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Stage 13: replaces each token with its best suggestion, if any.
fn correct_spelling(speller: &dyn SpellCorrector, words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|word| {
            speller
                .suggest(word, SPELLING_MAX_EDIT_DISTANCE)
                .into_iter()
                .next()
                .map_or_else(|| word.clone(), |best| best.term)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::SymSpell;

    fn normalize(text: &str, config: PipelineConfig) -> String {
        let lexicon = Lexicon::english();
        process_tweet(text, &config, &lexicon)
    }

    #[test]
    fn test_trial_masking() {
        assert_eq!(
            mask_mentions_and_urls("@bob see http://t.co/x ok", MaskMode::Trial, true),
            "see  ok"
        );
        assert_eq!(
            mask_mentions_and_urls("@bob see http://t.co/x", MaskMode::Trial, false),
            "<usertoken> see <urltoken> "
        );
    }

    #[test]
    fn test_production_masking() {
        assert_eq!(
            mask_mentions_and_urls("@USER look URL", MaskMode::Production, true),
            " look "
        );
        assert_eq!(
            mask_mentions_and_urls("@USER look URL", MaskMode::Production, false),
            "<usertoken> look <urltoken>"
        );
    }

    #[test]
    fn test_production_ignores_real_handles() {
        assert_eq!(
            mask_mentions_and_urls("@bob", MaskMode::Production, true),
            "@bob"
        );
    }

    #[test]
    fn test_strip_hashtags() {
        assert_eq!(strip_hashtags("so #blessed today #tbt"), "so today ");
    }

    #[test]
    fn test_remove_punctuation() {
        assert_eq!(remove_punctuation("don't! <go> #now_"), "don't go now");
    }

    #[test]
    fn test_reduce_lengthening() {
        assert_eq!(reduce_lengthening("soooo"), "soo");
        assert_eq!(reduce_lengthening("aaaaaaaah"), "aah");
        assert_eq!(reduce_lengthening("bleeeeerh"), "bleerh");
        assert_eq!(reduce_lengthening("good"), "good");
    }

    #[test]
    fn test_minimal_pipeline() {
        let out = normalize("Hello, WORLD!", PipelineConfig::minimal());
        assert_eq!(out, "hello world !");
    }

    #[test]
    fn test_placeholders_survive_without_punctuation_removal() {
        let out = normalize("@USER hi", PipelineConfig::minimal());
        assert_eq!(out, "< usertoken hi");
    }

    #[test]
    fn test_placeholders_with_punctuation_removal() {
        let config = PipelineConfig::minimal().with_remove_punctuation(true);
        assert_eq!(normalize("@USER hi URL", config), "usertoken hi urltoken");
    }

    #[test]
    fn test_contraction_expansion() {
        let config = PipelineConfig::minimal().with_expand_contractions(true);
        assert_eq!(normalize("I don't care", config), "i do not care");
        assert_eq!(normalize("I'm here", config), "i am here");
    }

    #[test]
    fn test_curly_apostrophe_contraction() {
        let config = PipelineConfig::minimal().with_expand_contractions(true);
        assert_eq!(normalize("don\u{2019}t", config), "do not");
    }

    #[test]
    fn test_lemmatization() {
        let config = PipelineConfig::minimal().with_lemmatize(true);
        assert_eq!(normalize("he was running", config), "he be run");
    }

    #[test]
    fn test_stopwords() {
        let config = PipelineConfig::minimal().with_remove_stopwords(true);
        assert_eq!(normalize("this is the best day", config), "best day");
    }

    #[test]
    fn test_stopword_reintroduced_by_expansion() {
        let config = PipelineConfig::minimal()
            .with_expand_contractions(true)
            .with_remove_stopwords(true);
        // Expansion runs first, so "not" is removed by the later stopword pass.
        assert_eq!(normalize("don't go", config), "go");
    }

    #[test]
    fn test_lengthening() {
        let config = PipelineConfig::minimal().with_reduce_lengthenings(true);
        assert_eq!(normalize("soooo good", config), "soo good");
    }

    #[test]
    fn test_emoji() {
        let out = normalize("\u{1F602}", PipelineConfig::minimal());
        assert_eq!(out, "face_with_tears_of_joy");
    }

    #[test]
    fn test_spell_stages_skipped_without_corrector() {
        let config = PipelineConfig::minimal()
            .with_segment_words(true)
            .with_correct_spelling(true);
        assert_eq!(normalize("helo wrld", config), "helo wrld");
    }

    #[test]
    fn test_spell_stages_with_corrector() {
        let speller = SymSpell::from_entries(
            [("hello", 100u64), ("world", 80), ("the", 500), ("cat", 40)],
            2,
            7,
        )
        .unwrap();
        let lexicon = Lexicon::english().with_spell_corrector(speller);
        let config = PipelineConfig::minimal()
            .with_segment_words(true)
            .with_correct_spelling(true);

        assert_eq!(process_tweet("helo thecat", &config, &lexicon), "hello the cat");
    }

    #[test]
    fn test_correction_keeps_unknown() {
        let speller = SymSpell::from_entries([("hello", 100u64)], 2, 7).unwrap();
        let lexicon = Lexicon::english().with_spell_corrector(speller);
        let config = PipelineConfig::minimal().with_correct_spelling(true);

        assert_eq!(process_tweet("helo xyzzy", &config, &lexicon), "hello xyzzy");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize("", PipelineConfig::default()), "");
        assert_eq!(normalize("   ", PipelineConfig::default()), "");
    }

    #[test]
    fn test_batch_matches_single() {
        let lexicon = Lexicon::english();
        let normalizer = Normalizer::new(PipelineConfig::default(), &lexicon);
        let texts = ["First tweet!!", "@USER second one", ""];
        let batch = normalizer.normalize_batch(&texts);
        assert_eq!(batch.len(), 3);
        for (text, out) in texts.iter().zip(&batch) {
            assert_eq!(&normalizer.normalize(text), out);
        }
    }
}

//! Text processing: tokenization, character rules, emoji handling and the
//! normalization pipeline itself.

pub mod emoji;
pub mod normalizer;
pub mod precleaner;
pub mod rules;
pub mod tokenizer;

pub use emoji::demojize;
pub use normalizer::{
    mask_mentions_and_urls, process_tweet, reduce_lengthening, remove_punctuation,
    strip_hashtags, Normalizer,
};
pub use precleaner::{preclean, process_optional_tweets, process_tweets};
pub use rules::{apply_rules, normalize_characters, SubstitutionRule, CHARACTER_RULES};
pub use tokenizer::{Token, TweetTokenizer};

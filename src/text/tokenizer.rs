//! Tweet-aware tokenization.
//!
//! Splits text with one big alternation regex, tried left to right at every
//! position: URLs, phone numbers, emoticons, HTML tags, arrows, handles,
//! hashtags, emails, joined emoji, then ordinary words, numbers, ellipses and
//! single leftover characters. Words keep internal apostrophes and dashes, so
//! `don't` and `e-mail` stay whole.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const URLS: &str = r#"(?:https?:/{1,3}|www\d{0,3}[.]|[a-z0-9.\-]+[.][a-z]{2,4}/)(?:[^\s()<>{}\[\]]+|\([^\s()]*?\([^\s()]+\)[^\s()]*?\)|\([^\s]+?\))+(?:\([^\s()]*?\([^\s()]+\)[^\s()]*?\)|\([^\s]+?\)|[^\s`!()\[\]{};:'".,<>?«»“”‘’])"#;

const PHONE_NUMBERS: &str = r"(?:(?:\+?[01][ *\-.\)]*)?(?:[\(]?\d{3}[ *\-.\)]*)?\d{3}[ *\-.\)]*\d{4})";

const EMOTICONS: &str = r"(?:[<>]?[:;=8][\-o\*']?[\)\]\(\[dDpP/:\}\{@\|\\]|[\)\]\(\[dDpP/:\}\{@\|\\][\-o\*']?[:;=8][<>]?|</?3)";

const HTML_TAGS: &str = r"<[^>\s]+>";

const ARROWS: &str = r"[\-]+>|<[\-]+";

const HANDLES: &str = r"(?:@[\w_]+)";

const HASHTAGS: &str = r"(?:\#+[\w_]+[\w'_\-]*[\w_]+)";

const EMAILS: &str = r"[\w.+-]+@[\w-]+\.(?:[\w-]\.?)+[\w-]";

const JOINED_EMOJI: &str =
    r".(?:[\x{1F3FB}-\x{1F3FF}]?(?:\x{200D}.[\x{1F3FB}-\x{1F3FF}]?)+|[\x{1F3FB}-\x{1F3FF}])";

const WORDS: &str = concat!(
    r"(?:[^\W\d_](?:[^\W\d_]|['\-_])+[^\W\d_])",
    r"|(?:[+\-]?\d+[,/.:-]\d+[+\-]?)",
    r"|(?:[\w_]+)",
    r"|(?:\.(?:\s*\.){1,})",
    r"|(?:\S)",
);

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    let alternatives = [
        URLS,
        PHONE_NUMBERS,
        EMOTICONS,
        HTML_TAGS,
        ARROWS,
        HANDLES,
        HASHTAGS,
        EMAILS,
        JOINED_EMOJI,
        WORDS,
    ];
    Regex::new(&format!("(?i){}", alternatives.join("|"))).unwrap()
});

static HTML_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());

/// A token produced by [`TweetTokenizer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Creates a token.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Tokenizer for tweets and other casual text. Case is preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct TweetTokenizer;

impl TweetTokenizer {
    /// Creates a tokenizer.
    pub fn new() -> Self {
        Self
    }

    /// Tokenizes text into a sequence of tokens.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.tokenize_to_strings(text)
            .into_iter()
            .map(Token)
            .collect()
    }

    /// Tokenizes text and returns only the token strings.
    ///
    /// HTML entities are decoded first. Inside the normalization pipeline this
    /// never triggers, since `&` is gone by the time text is tokenized; it
    /// matters for callers tokenizing raw text directly.
    pub fn tokenize_to_strings(&self, text: &str) -> Vec<String> {
        let text = replace_html_entities(text);
        let text = shorten_hanging_runs(&text);
        TOKEN_RE
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Decodes the common named entities and numeric character references.
/// Unknown entities are left untouched.
fn replace_html_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    HTML_ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                s if s.starts_with("#x") || s.starts_with("#X") => {
                    u32::from_str_radix(&s[2..], 16).ok().and_then(char::from_u32)
                }
                s if s.starts_with('#') => s[1..].parse::<u32>().ok().and_then(char::from_u32),
                _ => None,
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

/// Shortens runs of four or more identical non-alphanumeric characters to
/// three, which keeps the token regex from degrading on `!!!!!!!!`-style runs.
fn shorten_hanging_runs(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous: Option<char> = None;
    let mut run = 0;

    for ch in text.chars() {
        if Some(ch) == previous {
            run += 1;
        } else {
            previous = Some(ch);
            run = 1;
        }
        if run <= 3 || ch.is_ascii_alphanumeric() {
            result.push(ch);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        TweetTokenizer::new().tokenize_to_strings(text)
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokens("hello world"), vec!["hello", "world"]);
        assert_eq!(tokens("Hello, world!"), vec!["Hello", ",", "world", "!"]);
    }

    #[test]
    fn test_apostrophes_kept() {
        assert_eq!(tokens("i don't know"), vec!["i", "don't", "know"]);
        assert_eq!(tokens("can't stop"), vec!["can't", "stop"]);
    }

    #[test]
    fn test_dashed_words() {
        assert_eq!(tokens("well-known fact"), vec!["well-known", "fact"]);
    }

    #[test]
    fn test_emoticons() {
        assert_eq!(tokens("nice :) see you <3"), vec!["nice", ":)", "see", "you", "<3"]);
        assert_eq!(tokens(";-P"), vec![";-P"]);
    }

    #[test]
    fn test_handles_and_hashtags() {
        assert_eq!(
            tokens("@alice loves #rustlang"),
            vec!["@alice", "loves", "#rustlang"]
        );
    }

    #[test]
    fn test_urls_and_emails() {
        assert_eq!(
            tokens("see https://example.com/a now"),
            vec!["see", "https://example.com/a", "now"]
        );
        assert_eq!(tokens("mail bob@example.com"), vec!["mail", "bob@example.com"]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tokens("3.14 and 1,000"), vec!["3.14", "and", "1,000"]);
        assert_eq!(tokens("555-123-4567"), vec!["555-123-4567"]);
    }

    #[test]
    fn test_repeated_punctuation() {
        assert_eq!(tokens("what!!!!!!"), vec!["what", "!", "!", "!"]);
        assert_eq!(tokens("wait..."), vec!["wait", "..."]);
    }

    #[test]
    fn test_html_entities() {
        assert_eq!(tokens("a &amp; b"), vec!["a", "&", "b"]);
        assert_eq!(tokens("&#39;quoted&#39;"), vec!["'", "quoted", "'"]);
        assert_eq!(replace_html_entities("&bogus;"), "&bogus;");
    }

    #[test]
    fn test_entities_decoded_on_raw_text() {
        let toks = TweetTokenizer::new().tokenize("fish &amp; chips &lt;3");
        let toks: Vec<&str> = toks.iter().map(Token::as_str).collect();
        assert_eq!(toks, vec!["fish", "&", "chips", "<3"]);
    }

    #[test]
    fn test_hanging_runs() {
        assert_eq!(shorten_hanging_runs("no!!!!!!"), "no!!!");
        assert_eq!(shorten_hanging_runs("soooooo"), "soooooo");
    }

    #[test]
    fn test_empty() {
        assert!(tokens("").is_empty());
        assert!(tokens("   ").is_empty());
    }

    #[test]
    fn test_token_newtype() {
        let toks = TweetTokenizer::new().tokenize("hi there");
        assert_eq!(toks[0].as_str(), "hi");
        assert_eq!(toks[1].to_string(), "there");
        assert_eq!(toks[1].clone().into_string(), "there");
    }
}

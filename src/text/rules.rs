//! Ordered regex substitution table for character and punctuation normalization.
//!
//! Rules are applied strictly in table order. Several depend on earlier ones:
//! `!` padding has to happen before whitespace collapsing, and the idiom fixes
//! (`" u s "` etc.) match on the single-letter spacing the punctuation rules
//! produce.

use once_cell::sync::Lazy;
use regex::Regex;

/// One `(pattern, replacement)` rule. The replacement uses `regex` expansion
/// syntax (`${1}`).
#[derive(Debug)]
pub struct SubstitutionRule {
    pattern: Regex,
    replacement: &'static str,
}

impl SubstitutionRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("substitution rule pattern must compile"),
            replacement,
        }
    }

    /// The rule's source pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The replacement template.
    pub fn replacement(&self) -> &str {
        self.replacement
    }

    /// Applies this rule to every match in `text`.
    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }
}

/// Code points that make up emoji glyphs: pictographs, regional indicators,
/// skin tone modifiers, zero-width joiner and the emoji variation selector.
pub(crate) const EMOJI_CHARS: &str =
    r"\p{Extended_Pictographic}\x{1F1E6}-\x{1F1FF}\x{1F3FB}-\x{1F3FF}\x{200D}\x{FE0F}";

// Characters kept by the filter: letters, digits, `'`, `^`, `,`, `!`, `.`,
// `/`, the range `+`..`=` (which covers `+,-./0-9:;<=`) and `@`. Emoji
// glyphs survive too so they can be textualized afterwards.
fn disallowed_chars() -> String {
    format!(r"[^A-Za-z0-9'^,!./+-=@{}]", EMOJI_CHARS)
}

/// The character normalization table, in application order.
pub static CHARACTER_RULES: Lazy<Vec<SubstitutionRule>> = Lazy::new(|| {
    vec![
        SubstitutionRule::new("\u{2019}", "'"),
        SubstitutionRule::new(&disallowed_chars(), " "),
        SubstitutionRule::new(",", " "),
        SubstitutionRule::new(r"\.", " "),
        SubstitutionRule::new("!", " ! "),
        SubstitutionRule::new("/", " "),
        SubstitutionRule::new(r"\^", " ^ "),
        SubstitutionRule::new(r"\+", " + "),
        SubstitutionRule::new("-", " - "),
        SubstitutionRule::new("=", " = "),
        SubstitutionRule::new(r"(\d+)(k)", "${1}000"),
        SubstitutionRule::new(":", " : "),
        SubstitutionRule::new(" e g ", " eg "),
        SubstitutionRule::new(" b g ", " bg "),
        SubstitutionRule::new(" u s ", " american "),
        SubstitutionRule::new(r"\x00s", "0"),
        SubstitutionRule::new(" 9 11 ", "911"),
        SubstitutionRule::new("e - mail", "email"),
        SubstitutionRule::new("j k", "jk"),
        SubstitutionRule::new(r"\s{2,}", " "),
    ]
});

/// Applies `rules` in order, each to the output of the previous one.
pub fn apply_rules(text: &str, rules: &[SubstitutionRule]) -> String {
    rules
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

/// Applies the character normalization table.
pub fn normalize_characters(text: &str) -> String {
    apply_rules(text, &CHARACTER_RULES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_compiles() {
        assert_eq!(CHARACTER_RULES.len(), 20);
        assert_eq!(CHARACTER_RULES[0].replacement(), "'");
    }

    #[test]
    fn test_right_quote() {
        assert_eq!(normalize_characters("don\u{2019}t"), "don't");
    }

    #[test]
    fn test_disallowed_chars_become_spaces() {
        assert_eq!(normalize_characters("a&b*c"), "a b c");
        assert_eq!(normalize_characters("caf\u{e9}"), "caf ");
    }

    #[test]
    fn test_range_characters_kept() {
        assert_eq!(normalize_characters("a;b<c"), "a;b<c");
        assert_eq!(normalize_characters("a>b"), "a b");
    }

    #[test]
    fn test_punctuation_spacing() {
        assert_eq!(normalize_characters("wow!"), "wow ! ");
        assert_eq!(normalize_characters("a,b.c"), "a b c");
        assert_eq!(normalize_characters("x+y=z"), "x + y = z");
        assert_eq!(normalize_characters("and/or"), "and or");
        assert_eq!(normalize_characters("2^3"), "2 ^ 3");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(normalize_characters("10k followers"), "10000 followers");
    }

    #[test]
    fn test_colon_padding() {
        assert_eq!(normalize_characters("time:now"), "time : now");
    }

    #[test]
    fn test_idioms() {
        assert_eq!(normalize_characters("the u.s. army"), "the american army");
        assert_eq!(normalize_characters("e.g. this"), "e g this");
        assert_eq!(normalize_characters("say e.g. this"), "say eg this");
        assert_eq!(normalize_characters("my e-mail"), "my email");
        assert_eq!(normalize_characters("j/k"), "jk");
        assert_eq!(normalize_characters("on 9/11 ok"), "on911ok");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(normalize_characters("a   b\t\tc"), "a b c");
    }

    #[test]
    fn test_emoji_survives() {
        assert_eq!(normalize_characters("hi \u{1F602}"), "hi \u{1F602}");
    }

    #[test]
    fn test_order_matters() {
        let reversed: Vec<&SubstitutionRule> = CHARACTER_RULES.iter().rev().collect();
        let text = "wow!!";
        let forward = normalize_characters(text);
        let backward = reversed.iter().fold(text.to_string(), |acc, rule| rule.apply(&acc));
        assert_ne!(forward, backward);
    }
}

//! Emoji textualization.
//!
//! Every emoji glyph is replaced by its CLDR short name, snake-cased and padded
//! with a space on each side: `🔥` becomes ` fire `.

use crate::text::rules::EMOJI_CHARS;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

static EMOJI_COMPONENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("[{}]", EMOJI_CHARS)).unwrap());

/// Replaces emoji glyphs in `text` with ` name ` tokens.
///
/// Glyphs without a known name are replaced by a space so no pictographic
/// code point survives.
pub fn demojize(text: &str) -> String {
    if !EMOJI_COMPONENT.is_match(text) {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len() * 2);
    for grapheme in text.graphemes(true) {
        if !EMOJI_COMPONENT.is_match(grapheme) {
            result.push_str(grapheme);
            continue;
        }
        match lookup(grapheme) {
            Some(emoji) => {
                result.push(' ');
                result.push_str(&emoji_name(emoji.name()));
                result.push(' ');
            }
            None => result.push_str(&EMOJI_COMPONENT.replace_all(grapheme, " ")),
        }
    }

    result
}

/// Looks a grapheme up, retrying without variation selectors and skin tones.
fn lookup(grapheme: &str) -> Option<&'static emojis::Emoji> {
    emojis::get(grapheme).or_else(|| {
        let bare: String = grapheme
            .chars()
            .filter(|c| !matches!(c, '\u{FE0F}' | '\u{1F3FB}'..='\u{1F3FF}'))
            .collect();
        emojis::get(&bare)
    })
}

/// `"flag: Côte d’Ivoire"` -> `"flag_cote_d'ivoire"`.
fn emoji_name(name: &str) -> String {
    name.nfd()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            c if c.is_whitespace() || c == '_' => Some('_'),
            '-' => Some('-'),
            '\'' | '\u{2019}' => Some('\''),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_emoji() {
        assert_eq!(demojize("\u{1F602}"), " face_with_tears_of_joy ");
    }

    #[test]
    fn test_emoji_in_text() {
        assert_eq!(demojize("lit\u{1F525}"), "lit fire ");
    }

    #[test]
    fn test_variation_selector() {
        assert_eq!(demojize("\u{2764}\u{FE0F}"), " red_heart ");
    }

    #[test]
    fn test_skin_tone() {
        let out = demojize("\u{1F44D}\u{1F3FD}");
        assert!(out.starts_with(" thumbs_up"));
        assert!(out.ends_with(' '));
        assert!(out.is_ascii());
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(demojize("no emoji here"), "no emoji here");
        assert_eq!(demojize(""), "");
    }

    #[test]
    fn test_name_folding() {
        assert_eq!(emoji_name("flag: C\u{f4}te d\u{2019}Ivoire"), "flag_cote_d'ivoire");
        assert_eq!(emoji_name("T-Rex"), "t-rex");
    }

    #[test]
    fn test_stray_joiner_removed() {
        assert_eq!(demojize("a\u{200D}"), "a ");
    }
}

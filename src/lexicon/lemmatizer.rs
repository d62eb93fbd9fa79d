//! Verb lemmatization.
//!
//! The pipeline only needs `token -> base verb form`; [`Lemmatizer`] is that
//! seam. [`MorphyLemmatizer`] is the bundled implementation: WordNet-style
//! morphological reduction driven by an irregular-form exception table, a small
//! set of suffix detachment rules, and a lexicon of valid base verbs.

use crate::error::{Result, TweetNormError};
use log::debug;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Reduces a token to its base form, reading every token as a verb.
pub trait Lemmatizer: Send + Sync {
    /// Returns the base verb form of `token`, or `token` itself when no
    /// reduction applies.
    fn lemmatize_verb(&self, token: &str) -> String;
}

/// Verb suffix detachment rules, tried in order.
const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

/// Irregular inflections: `(inflected, base)`.
const VERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("am", "be"), ("are", "be"), ("is", "be"), ("was", "be"), ("were", "be"), ("been", "be"),
    ("being", "be"), ("has", "have"), ("had", "have"), ("having", "have"), ("does", "do"),
    ("did", "do"), ("done", "do"), ("doing", "do"), ("went", "go"), ("gone", "go"),
    ("goes", "go"), ("said", "say"), ("says", "say"), ("made", "make"), ("took", "take"),
    ("taken", "take"), ("came", "come"), ("saw", "see"), ("seen", "see"), ("knew", "know"),
    ("known", "know"), ("got", "get"), ("gotten", "get"), ("getting", "get"), ("gave", "give"),
    ("given", "give"), ("found", "find"), ("thought", "think"), ("told", "tell"),
    ("became", "become"), ("left", "leave"), ("felt", "feel"), ("brought", "bring"),
    ("began", "begin"), ("begun", "begin"), ("beginning", "begin"), ("kept", "keep"),
    ("held", "hold"), ("wrote", "write"), ("written", "write"), ("stood", "stand"),
    ("heard", "hear"), ("meant", "mean"), ("met", "meet"), ("ran", "run"), ("running", "run"),
    ("paid", "pay"), ("sat", "sit"), ("sitting", "sit"), ("spoke", "speak"),
    ("spoken", "speak"), ("lay", "lie"), ("lain", "lie"), ("lying", "lie"), ("led", "lead"),
    ("grew", "grow"), ("grown", "grow"), ("lost", "lose"), ("fell", "fall"),
    ("fallen", "fall"), ("sent", "send"), ("built", "build"), ("understood", "understand"),
    ("drew", "draw"), ("drawn", "draw"), ("broke", "break"), ("broken", "break"),
    ("spent", "spend"), ("rose", "rise"), ("risen", "rise"), ("drove", "drive"),
    ("driven", "drive"), ("bought", "buy"), ("wore", "wear"), ("worn", "wear"),
    ("chose", "choose"), ("chosen", "choose"), ("sought", "seek"), ("threw", "throw"),
    ("thrown", "throw"), ("caught", "catch"), ("dealt", "deal"), ("won", "win"),
    ("winning", "win"), ("forgot", "forget"), ("forgotten", "forget"), ("sold", "sell"),
    ("fought", "fight"), ("ate", "eat"), ("eaten", "eat"), ("taught", "teach"),
    ("slept", "sleep"), ("hid", "hide"), ("hidden", "hide"), ("flew", "fly"),
    ("flown", "fly"), ("shot", "shoot"), ("drank", "drink"), ("drunk", "drink"),
    ("sang", "sing"), ("sung", "sing"), ("swam", "swim"), ("swimming", "swim"),
    ("stole", "steal"), ("stolen", "steal"), ("woke", "wake"), ("woken", "wake"),
    ("hung", "hang"), ("bit", "bite"), ("bitten", "bite"), ("blew", "blow"), ("blown", "blow"),
    ("fed", "feed"), ("fled", "flee"), ("forgave", "forgive"), ("forgiven", "forgive"),
    ("froze", "freeze"), ("frozen", "freeze"), ("ground", "grind"), ("laid", "lay"),
    ("lent", "lend"), ("rode", "ride"), ("ridden", "ride"), ("rang", "ring"), ("rung", "ring"),
    ("shook", "shake"), ("shaken", "shake"), ("shone", "shine"), ("sank", "sink"),
    ("sunk", "sink"), ("slid", "slide"), ("stuck", "stick"), ("stung", "sting"),
    ("struck", "strike"), ("swore", "swear"), ("sworn", "swear"), ("swept", "sweep"),
    ("tore", "tear"), ("torn", "tear"), ("wept", "weep"), ("wound", "wind"),
    ("stopped", "stop"), ("stopping", "stop"), ("planned", "plan"), ("planning", "plan"),
    ("shopping", "shop"), ("shopped", "shop"), ("putting", "put"), ("cutting", "cut"),
    ("letting", "let"), ("setting", "set"), ("hitting", "hit"), ("shutting", "shut"),
    ("dropped", "drop"), ("dropping", "drop"), ("admitted", "admit"), ("admitting", "admit"),
    ("committed", "commit"), ("committing", "commit"), ("hugged", "hug"), ("hugging", "hug"),
    ("begged", "beg"), ("begging", "beg"), ("chatted", "chat"), ("chatting", "chat"),
    ("grabbed", "grab"), ("grabbing", "grab"), ("voted", "vote"), ("lied", "lie"),
    ("died", "die"), ("dying", "die"), ("tied", "tie"), ("tying", "tie"),
];

/// Common English base verbs.
const BASE_VERBS: &[&str] = &[
    "accept", "act", "add", "admit", "agree", "allow", "answer", "appear", "apply", "argue",
    "arrive", "ask", "attack", "avoid", "bake", "be", "bear", "beat", "become", "beg", "begin",
    "believe", "belong", "bite", "blame", "block", "blow", "boil", "break", "bring", "build",
    "burn", "buy", "call", "care", "carry", "catch", "cause", "change", "chat", "cheat", "check",
    "choose", "claim", "clean", "clear", "climb", "close", "come", "commit", "complain",
    "consider", "continue", "cook", "cost", "count", "cover", "create", "cry", "cut", "dance",
    "deal", "decide", "defend", "deny", "depend", "deserve", "destroy", "die", "disagree",
    "do", "drag", "draw", "dream", "dress", "drink", "drive", "drop", "eat", "end", "enjoy",
    "expect", "explain", "fail", "fall", "fear", "feed", "feel", "fight", "fill", "find",
    "finish", "fire", "fix", "flee", "fly", "follow", "forget", "forgive", "freeze", "gain",
    "get", "give", "go", "grab", "grind", "grow", "guess", "hang", "happen", "hate", "have",
    "hear", "help", "hide", "hit", "hold", "hope", "hug", "hurt", "ignore", "imagine",
    "improve", "include", "join", "joke", "judge", "jump", "keep", "kick", "kill", "kiss",
    "know", "laugh", "lay", "lead", "learn", "leave", "lend", "let", "lie", "like", "listen",
    "live", "look", "lose", "love", "make", "manage", "mark", "marry", "matter", "mean",
    "meet", "mention", "mind", "miss", "move", "need", "notice", "offer", "open", "order",
    "own", "pay", "pick", "plan", "play", "post", "prefer", "prepare", "pretend", "promise",
    "protect", "prove", "pull", "push", "put", "question", "quit", "rain", "reach", "read",
    "realize", "receive", "remember", "remove", "reply", "report", "respect", "rest",
    "retweet", "return", "ride", "ring", "rise", "run", "save", "say", "scream", "search",
    "see", "seek", "seem", "sell", "send", "serve", "set", "shake", "share", "shine", "shoot",
    "shop", "shout", "show", "shut", "sing", "sink", "sit", "sleep", "slide", "smell", "smile",
    "speak", "spend", "stand", "start", "stay", "steal", "stick", "sting", "stop", "strike",
    "study", "suck", "suggest", "support", "suppose", "swear", "sweep", "swim", "take",
    "talk", "teach", "tear", "tell", "thank", "think", "throw", "tie", "touch", "travel",
    "trust", "try", "turn", "tweet", "understand", "use", "vote", "wait", "wake", "walk",
    "want", "watch", "wear", "weep", "win", "wind", "wish", "wonder", "work", "worry",
    "write", "yell",
];

/// WordNet-morphy style verb lemmatizer.
#[derive(Debug, Clone)]
pub struct MorphyLemmatizer {
    verbs: HashSet<String>,
    exceptions: HashMap<String, Vec<String>>,
}

impl Default for MorphyLemmatizer {
    fn default() -> Self {
        Self::english()
    }
}

impl MorphyLemmatizer {
    /// Lemmatizer backed by the built-in English verb tables.
    pub fn english() -> Self {
        let verbs = BASE_VERBS.iter().map(|v| v.to_string()).collect();
        let mut exceptions: HashMap<String, Vec<String>> = HashMap::new();
        for (inflected, base) in VERB_EXCEPTIONS {
            exceptions
                .entry(inflected.to_string())
                .or_default()
                .push(base.to_string());
        }
        Self { verbs, exceptions }
    }

    /// Builds a lemmatizer from explicit tables.
    pub fn new(verbs: HashSet<String>, exceptions: HashMap<String, Vec<String>>) -> Self {
        Self { verbs, exceptions }
    }

    /// Loads the verb lexicon (one base verb per line) and, optionally, an
    /// exception file (`inflected base [base...]` per line).
    pub fn from_files(verbs_path: &Path, exceptions_path: Option<&Path>) -> Result<Self> {
        let content = crate::error::read_lexicon_file(verbs_path)?;
        let verbs: HashSet<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();

        let mut exceptions: HashMap<String, Vec<String>> = HashMap::new();
        if let Some(path) = exceptions_path {
            let content = crate::error::read_lexicon_file(path)?;
            for (idx, line) in content.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                let mut fields = line.split_whitespace();
                let inflected = fields.next().unwrap_or_default();
                let bases: Vec<String> = fields.map(str::to_string).collect();
                if bases.is_empty() {
                    return Err(TweetNormError::InvalidLexicon {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        reason: format!("no base form for '{}'", inflected),
                    });
                }
                exceptions.entry(inflected.to_string()).or_default().extend(bases);
            }
        }

        debug!(
            "Loaded verb lexicon: {} verbs, {} exceptions",
            verbs.len(),
            exceptions.len()
        );
        Ok(Self { verbs, exceptions })
    }

    /// Number of known base verbs.
    pub fn vocabulary_size(&self) -> usize {
        self.verbs.len()
    }

    /// All valid base-form readings of `form`, in discovery order.
    fn candidates(&self, form: &str) -> Vec<String> {
        let mut forms = vec![form.to_string()];

        if let Some(bases) = self.exceptions.get(form) {
            forms.extend(bases.iter().cloned());
        } else {
            for (suffix, replacement) in VERB_RULES {
                if let Some(stem) = form.strip_suffix(suffix) {
                    forms.push(format!("{}{}", stem, replacement));
                }
            }
        }

        let mut seen = HashSet::new();
        forms
            .into_iter()
            .filter(|f| self.verbs.contains(f) && seen.insert(f.clone()))
            .collect()
    }
}

impl Lemmatizer for MorphyLemmatizer {
    fn lemmatize_verb(&self, token: &str) -> String {
        // Shortest reading wins; ties keep the earliest.
        self.candidates(token)
            .into_iter()
            .reduce(|best, next| if next.len() < best.len() { next } else { best })
            .unwrap_or_else(|| token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_regular_inflections() {
        let lemmatizer = MorphyLemmatizer::english();
        assert_eq!(lemmatizer.lemmatize_verb("believed"), "believe");
        assert_eq!(lemmatizer.lemmatize_verb("believes"), "believe");
        assert_eq!(lemmatizer.lemmatize_verb("talking"), "talk");
        assert_eq!(lemmatizer.lemmatize_verb("tries"), "try");
        assert_eq!(lemmatizer.lemmatize_verb("watches"), "watch");
    }

    #[test]
    fn test_irregular_inflections() {
        let lemmatizer = MorphyLemmatizer::english();
        assert_eq!(lemmatizer.lemmatize_verb("is"), "be");
        assert_eq!(lemmatizer.lemmatize_verb("was"), "be");
        assert_eq!(lemmatizer.lemmatize_verb("went"), "go");
        assert_eq!(lemmatizer.lemmatize_verb("running"), "run");
    }

    #[test]
    fn test_base_form_is_stable() {
        let lemmatizer = MorphyLemmatizer::english();
        for verb in ["believe", "be", "go", "tweet", "sing"] {
            assert_eq!(lemmatizer.lemmatize_verb(verb), verb);
        }
    }

    #[test]
    fn test_unknown_passthrough() {
        let lemmatizer = MorphyLemmatizer::english();
        assert_eq!(lemmatizer.lemmatize_verb("maga"), "maga");
        assert_eq!(lemmatizer.lemmatize_verb("tables"), "tables");
        assert_eq!(lemmatizer.lemmatize_verb("I"), "I");
    }

    #[test]
    fn test_from_files() {
        let mut verbs = tempfile::NamedTempFile::new().unwrap();
        writeln!(verbs, "yeet").unwrap();
        writeln!(verbs, "be").unwrap();
        let mut exceptions = tempfile::NamedTempFile::new().unwrap();
        writeln!(exceptions, "yote yeet").unwrap();

        let lemmatizer =
            MorphyLemmatizer::from_files(verbs.path(), Some(exceptions.path())).unwrap();
        assert_eq!(lemmatizer.vocabulary_size(), 2);
        assert_eq!(lemmatizer.lemmatize_verb("yeeted"), "yeet");
        assert_eq!(lemmatizer.lemmatize_verb("yote"), "yeet");
        assert_eq!(lemmatizer.lemmatize_verb("was"), "was");
    }

    #[test]
    fn test_bad_exception_line() {
        let verbs = tempfile::NamedTempFile::new().unwrap();
        let mut exceptions = tempfile::NamedTempFile::new().unwrap();
        writeln!(exceptions, "lonely").unwrap();

        let err = MorphyLemmatizer::from_files(verbs.path(), Some(exceptions.path())).unwrap_err();
        assert!(matches!(err, TweetNormError::InvalidLexicon { line: 1, .. }));
    }
}

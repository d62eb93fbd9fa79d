//! Error types for the tweet normalization library.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for tweetnorm operations.
///
/// Per-text normalization never fails; every variant here belongs to resource
/// or configuration loading, which happens once before any text is processed.
#[derive(Error, Debug)]
pub enum TweetNormError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// A lexicon file contained a line that could not be parsed.
    #[error("Invalid lexicon {path}:{line}: {reason}")]
    InvalidLexicon {
        /// File being parsed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Empty input.
    #[error("Empty input: {0}")]
    EmptyInput(String),
}

/// Result type alias for tweetnorm operations.
pub type Result<T> = std::result::Result<T, TweetNormError>;

/// Opens a lexicon file, mapping a missing path to [`TweetNormError::FileNotFound`].
pub(crate) fn read_lexicon_file(path: &std::path::Path) -> Result<String> {
    if !path.exists() {
        return Err(TweetNormError::FileNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = read_lexicon_file(std::path::Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, TweetNormError::FileNotFound(_)));
    }

    #[test]
    fn test_invalid_lexicon_display() {
        let err = TweetNormError::InvalidLexicon {
            path: PathBuf::from("dict.txt"),
            line: 3,
            reason: "missing count".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid lexicon dict.txt:3: missing count");
    }
}

//! Stopword filtering
//!
//! Closed-class English words dropped by the lexicon-oriented normalizer.
//! The built-in list is the English list shipped with NLTK, so cleaned text
//! matches what the lexicon demo has always produced.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashSet;

use crate::error::LoadError;

/// English stopwords (NLTK).
#[rustfmt::skip]
pub const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "that'll", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
    "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below",
    "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t",
    "can", "will", "just", "don", "don't", "should", "should've", "now", "d", "ll",
    "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven",
    "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't",
    "needn", "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn", "wasn't",
    "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
];

/// A filter for removing stopwords from cleaned text.
///
/// Lookups are exact: the normalizer only hands it lowercase tokens.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// The built-in English list.
    pub fn english() -> Self {
        Self::from_list(ENGLISH)
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        let stopwords = words.iter().map(|w| w.to_lowercase()).collect();
        Self { stopwords }
    }

    /// Reads one stopword per line. Blank lines and `#` comments are skipped.
    ///
    /// # Errors
    /// Returns [`LoadError::Io`] when the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let stopwords = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Ok(Self { stopwords })
    }

    /// Check if a word is a stopword
    #[inline]
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Number of stopwords in the list.
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Returns `true` when nothing is filtered.
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn closed_class_words_are_stopwords() {
        let f = StopwordFilter::english();
        for w in ["the", "is", "and", "my", "not", "very", "just"] {
            assert!(f.is_stopword(w), "{w} should be a stopword");
        }
    }

    #[test]
    fn content_words_are_kept() {
        let f = StopwordFilter::english();
        for w in ["love", "iphone", "camera", "great", "google"] {
            assert!(!f.is_stopword(w));
        }
    }

    #[test]
    fn english_list_size() {
        assert_eq!(StopwordFilter::english().len(), 179);
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let f = StopwordFilter::empty();
        assert!(f.is_empty());
        assert!(!f.is_stopword("the"));
    }

    #[test]
    fn from_file_skips_comments_and_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# custom list").unwrap();
        writeln!(file, "Foo").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  bar  ").unwrap();

        let f = StopwordFilter::from_file(file.path()).unwrap();
        assert_eq!(f.len(), 2);
        assert!(f.is_stopword("foo"));
        assert!(f.is_stopword("bar"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = StopwordFilter::from_file(Path::new("/nonexistent/stopwords.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}

//! Token refinement for lexicon scoring.
//!
//! Runs on letter-only text: splits it into words, drops stopwords and
//! one-letter tokens, lemmatizes what is left and joins the result with
//! single spaces.

use std::sync::Arc;

use crate::analyzer::lemmatizer::Lemmatizer;
use crate::analyzer::stopwords::StopwordFilter;
use crate::analyzer::tokenizer::Tokenizer;

/// Stopword removal plus lemmatization.
#[derive(Debug, Clone)]
pub struct TokenRefiner {
    stopwords: Arc<StopwordFilter>,
    lemmatizer: Arc<Lemmatizer>,
    min_len: usize,
}

impl Default for TokenRefiner {
    fn default() -> Self {
        Self::new(
            Arc::new(StopwordFilter::english()),
            Arc::new(Lemmatizer::builtin()),
        )
    }
}

impl TokenRefiner {
    /// Tokens shorter than this are dropped.
    pub const DEFAULT_MIN_LEN: usize = 2;

    /// Creates a refiner over shared resources.
    pub fn new(stopwords: Arc<StopwordFilter>, lemmatizer: Arc<Lemmatizer>) -> Self {
        Self {
            stopwords,
            lemmatizer,
            min_len: Self::DEFAULT_MIN_LEN,
        }
    }

    /// Overrides the minimum token length.
    #[must_use]
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Refines letter-only text into `out`, clearing it first.
    ///
    /// Stopword and length checks look at the token as written; only the
    /// survivors are lemmatized.
    pub fn refine_into(&self, letters: &str, out: &mut String) {
        out.clear();

        Tokenizer.tokenize(letters, |token, _| {
            if token.len() < self.min_len || self.stopwords.is_stopword(token) {
                return;
            }
            let lemma = self.lemmatizer.lemmatize(token);
            if lemma.is_empty() {
                return;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&lemma);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refine(input: &str) -> String {
        let mut out = String::new();
        TokenRefiner::default().refine_into(input, &mut out);
        out
    }

    #[test]
    fn drops_stopwords() {
        assert_eq!(refine("the battery is a joke"), "battery joke");
    }

    #[test]
    fn drops_single_letters() {
        assert_eq!(refine("x zz q"), "zz");
    }

    #[test]
    fn lemmatizes_survivors() {
        assert_eq!(refine("phones keep crashing"), "phone keep crash");
    }

    #[test]
    fn all_filtered_yields_empty() {
        assert_eq!(refine("i am the"), "");
        assert_eq!(refine(""), "");
    }

    #[test]
    fn custom_min_len() {
        let mut out = String::new();
        TokenRefiner::default()
            .with_min_len(4)
            .refine_into("app camera", &mut out);
        assert_eq!(out, "camera");
    }

    #[test]
    fn clears_previous_output() {
        let mut out = String::from("stale");
        TokenRefiner::default().refine_into("camera", &mut out);
        assert_eq!(out, "camera");
    }
}

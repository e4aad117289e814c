//! Linguistic resources for the lexicon variant.
//!
//! Three tables feed token refinement and scoring: stopwords, lemma
//! vocabulary and word valences. All three are compiled in. A resource
//! directory may override any of them file by file:
//!
//! | file                | overrides                |
//! |---------------------|--------------------------|
//! | `stopwords.txt`     | [`StopwordFilter`]       |
//! | `lemmas.txt`        | [`Lemmatizer`]           |
//! | `vader_lexicon.txt` | [`ValenceLexicon`]       |
//!
//! Lexicon words always join the lemma vocabulary, so a scored word is never
//! reduced to a form the lexicon does not know.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::analyzer::{Lemmatizer, StopwordFilter, TokenRefiner};
use crate::error::LoadError;
use crate::scoring::{PolarityScorer, ValenceLexicon};

/// Stopword list file name inside a resource directory.
pub const STOPWORDS_FILE: &str = "stopwords.txt";
/// Lemma vocabulary file name inside a resource directory.
pub const LEMMAS_FILE: &str = "lemmas.txt";
/// Valence lexicon file name inside a resource directory.
pub const LEXICON_FILE: &str = "vader_lexicon.txt";

/// Immutable, shareable resource bundle.
#[derive(Debug, Clone)]
pub struct LinguisticResources {
    stopwords: Arc<StopwordFilter>,
    lemmatizer: Arc<Lemmatizer>,
    lexicon: Arc<ValenceLexicon>,
}

impl Default for LinguisticResources {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LinguisticResources {
    /// Compiled-in tables only.
    pub fn builtin() -> Self {
        Self::assemble(
            StopwordFilter::english(),
            Lemmatizer::builtin(),
            ValenceLexicon::builtin(),
        )
    }

    /// Built-in tables, with per-file overrides from `dir` when given.
    ///
    /// # Errors
    /// [`LoadError::Io`] when `dir` itself is unreadable, or any error from
    /// parsing a file that is present.
    pub fn load(dir: Option<&Path>) -> Result<Self, LoadError> {
        let Some(dir) = dir else {
            return Ok(Self::builtin());
        };

        // Surface a missing directory instead of silently using defaults.
        std::fs::read_dir(dir).map_err(|e| LoadError::io(dir, e))?;

        let stopwords = load_or(
            dir,
            STOPWORDS_FILE,
            StopwordFilter::from_file,
            StopwordFilter::english,
        )?;
        let lemmatizer = load_or(dir, LEMMAS_FILE, Lemmatizer::from_file, Lemmatizer::builtin)?;
        let lexicon = load_or(
            dir,
            LEXICON_FILE,
            ValenceLexicon::from_file,
            ValenceLexicon::builtin,
        )?;

        let resources = Self::assemble(stopwords, lemmatizer, lexicon);
        info!(
            dir = %dir.display(),
            stopwords = resources.stopwords.len(),
            lemmas = resources.lemmatizer.vocabulary_len(),
            valences = resources.lexicon.len(),
            "loaded linguistic resources"
        );
        Ok(resources)
    }

    fn assemble(
        stopwords: StopwordFilter,
        mut lemmatizer: Lemmatizer,
        lexicon: ValenceLexicon,
    ) -> Self {
        lemmatizer.extend_vocabulary(lexicon.words());
        Self {
            stopwords: Arc::new(stopwords),
            lemmatizer: Arc::new(lemmatizer),
            lexicon: Arc::new(lexicon),
        }
    }

    /// Token refiner sharing these tables.
    pub fn refiner(&self) -> TokenRefiner {
        TokenRefiner::new(Arc::clone(&self.stopwords), Arc::clone(&self.lemmatizer))
    }

    /// The valence lexicon as a scoring backend.
    pub fn scorer(&self) -> Arc<dyn PolarityScorer> {
        self.lexicon.clone()
    }

    /// Stopword table.
    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    /// Lemmatizer, with lexicon words merged into its vocabulary.
    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }

    /// Valence table.
    pub fn lexicon(&self) -> &ValenceLexicon {
        &self.lexicon
    }
}

fn load_or<T>(
    dir: &Path,
    name: &str,
    read: impl FnOnce(&Path) -> Result<T, LoadError>,
    fallback: impl FnOnce() -> T,
) -> Result<T, LoadError> {
    let path = dir.join(name);
    if path.is_file() {
        read(&path)
    } else {
        debug!(file = name, "no override, using built-in table");
        Ok(fallback())
    }
}

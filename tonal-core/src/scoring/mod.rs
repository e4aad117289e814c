//! Scoring backends.
//!
//! The pipeline only talks to these two traits. Implementations are
//! loaded once, before serving, and shared read-only afterwards, hence the
//! `Send + Sync` bounds.

pub mod classifier;
pub mod lexicon;

pub use classifier::{LinearTextModel, ModelArtifact};
pub use lexicon::ValenceLexicon;

use tonal_types::PolarityScore;

/// A pretrained multiclass text model.
pub trait Classifier: Send + Sync {
    /// Predicts the class id of already-cleaned text.
    ///
    /// Must be deterministic. Ids outside `{0, 1, 2}` are tolerated by the
    /// pipeline and reported as an unknown label.
    fn predict_class(&self, cleaned: &str) -> i64;
}

/// A lexicon-based polarity scorer.
pub trait PolarityScorer: Send + Sync {
    /// Aggregate polarity of `text`, in `[-1, 1]`.
    fn polarity_compound(&self, text: &str) -> PolarityScore;
}

impl<F> Classifier for F
where
    F: Fn(&str) -> i64 + Send + Sync,
{
    #[inline]
    fn predict_class(&self, cleaned: &str) -> i64 {
        self(cleaned)
    }
}

impl<F> PolarityScorer for F
where
    F: Fn(&str) -> PolarityScore + Send + Sync,
{
    #[inline]
    fn polarity_compound(&self, text: &str) -> PolarityScore {
        self(text)
    }
}

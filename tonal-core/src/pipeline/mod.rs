//! Submission → cleaned text → backend → label.
//!
//! A [`SentimentPipeline`] is built once per process and shared by every
//! request. It owns no per-request state: normalization writes into a fresh
//! buffer and both backends are read-only after loading.

mod lazy;

pub use lazy::LazyResource;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use tonal_types::{AsRawText, PolarityScore, SentimentLabel, Submission, Thresholds, Variant};

use crate::analyzer::TextNormalizer;
use crate::error::{AnalyzeError, LoadError};
use crate::label;
use crate::resources::LinguisticResources;
use crate::scoring::{Classifier, LinearTextModel, PolarityScorer};

/// Scoring backend of a pipeline. Its kind fixes the [`Variant`].
#[derive(Debug)]
pub enum Backend {
    /// Multiclass model over cleaned text.
    Classifier(LazyResource<dyn Classifier>),
    /// Compound polarity over refined text.
    Lexicon(LazyResource<dyn PolarityScorer>),
}

impl Backend {
    /// A classifier loaded from a JSON artifact on first use.
    pub fn classifier_artifact(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Backend::Classifier(LazyResource::new("classifier", move || {
            let model = LinearTextModel::load(&path)?;
            Ok(Arc::new(model) as Arc<dyn Classifier>)
        }))
    }

    /// An in-memory classifier.
    pub fn classifier(model: Arc<dyn Classifier>) -> Self {
        Backend::Classifier(LazyResource::ready("classifier", model))
    }

    /// An in-memory polarity scorer.
    pub fn lexicon(scorer: Arc<dyn PolarityScorer>) -> Self {
        Backend::Lexicon(LazyResource::ready("lexicon", scorer))
    }

    /// Which demo this backend drives.
    pub fn variant(&self) -> Variant {
        match self {
            Backend::Classifier(_) => Variant::Classifier,
            Backend::Lexicon(_) => Variant::Lexicon,
        }
    }

    /// Forces the load. A failure is final.
    pub fn warm(&self) -> Result<(), Arc<LoadError>> {
        match self {
            Backend::Classifier(c) => c.get().map(drop),
            Backend::Lexicon(s) => s.get().map(drop),
        }
    }
}

/// Outcome of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Display label.
    pub label: SentimentLabel,
    /// Normalized text handed to the backend (before any raw fallback).
    pub cleaned: String,
    /// Class id returned by the classifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
    /// Compound polarity from the lexicon scorer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<PolarityScore>,
    /// The lexicon scorer saw the raw submission because cleaning left
    /// nothing.
    pub raw_fallback: bool,
}

/// End-to-end analyzer for one variant.
#[derive(Debug)]
pub struct SentimentPipeline {
    normalizer: TextNormalizer,
    backend: Backend,
    thresholds: Thresholds,
}

impl SentimentPipeline {
    /// Pairs a normalizer with a backend. The caller keeps them consistent.
    pub fn new(normalizer: TextNormalizer, backend: Backend, thresholds: Thresholds) -> Self {
        Self {
            normalizer,
            backend,
            thresholds,
        }
    }

    /// Variant A: classifier-oriented cleaning.
    pub fn classifier(backend: Backend) -> Self {
        Self::new(TextNormalizer::classifier(), backend, Thresholds::default())
    }

    /// Variant B: lexicon-oriented cleaning refined with `resources`.
    pub fn lexicon(backend: Backend, resources: &LinguisticResources) -> Self {
        Self::new(
            TextNormalizer::lexicon(resources),
            backend,
            Thresholds::default(),
        )
    }

    /// Variant B using the resources' own valence table.
    pub fn builtin_lexicon(resources: &LinguisticResources) -> Self {
        Self::lexicon(Backend::lexicon(resources.scorer()), resources)
    }

    /// Replaces the polarity thresholds.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Which demo this pipeline drives.
    pub fn variant(&self) -> Variant {
        self.backend.variant()
    }

    /// Compound thresholds for the lexicon variant.
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Cleaning stage.
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Loads the backend now. Call before serving.
    pub fn warm(&self) -> Result<(), Arc<LoadError>> {
        self.backend.warm()
    }

    /// Analyzes one submission.
    ///
    /// # Errors
    /// [`AnalyzeError::Input`] for blank text, [`AnalyzeError::Backend`] if
    /// the backend failed to load, now or on an earlier call.
    pub fn analyze(&self, text: &str) -> Result<Analysis, AnalyzeError> {
        let submission = Submission::parse(text).inspect_err(|_| {
            warn!(variant = %self.variant(), "rejected blank submission");
        })?;
        Ok(self.analyze_submission(submission)?)
    }

    /// Like [`analyze`](Self::analyze) for any value that might be text.
    /// Non-text values are treated as blank.
    pub fn analyze_raw<T: AsRawText + ?Sized>(&self, input: &T) -> Result<Analysis, AnalyzeError> {
        self.analyze(input.as_raw_text().unwrap_or_default())
    }

    /// Analyzes an already-validated submission.
    pub fn analyze_submission(
        &self,
        submission: Submission<'_>,
    ) -> Result<Analysis, Arc<LoadError>> {
        let raw = submission.text();
        let cleaned = self.normalizer.normalize(raw);

        let analysis = match &self.backend {
            Backend::Classifier(model) => {
                let id = model.get()?.predict_class(&cleaned);
                let label = label::from_class_id(id);
                if !label.is_known() {
                    warn!(class_id = id, "classifier returned an unmapped class id");
                }
                Analysis {
                    label,
                    cleaned,
                    class_id: Some(id),
                    score: None,
                    raw_fallback: false,
                }
            }
            Backend::Lexicon(scorer) => {
                let scorer = scorer.get()?;
                let raw_fallback = cleaned.is_empty();
                let score = if raw_fallback {
                    scorer.polarity_compound(raw)
                } else {
                    scorer.polarity_compound(&cleaned)
                };
                Analysis {
                    label: label::from_polarity(score, &self.thresholds),
                    cleaned,
                    class_id: None,
                    score: Some(score),
                    raw_fallback,
                }
            }
        };

        debug!(
            variant = %self.variant(),
            label = %analysis.label,
            cleaned_len = analysis.cleaned.len(),
            raw_fallback = analysis.raw_fallback,
            "analyzed submission"
        );
        Ok(analysis)
    }
}

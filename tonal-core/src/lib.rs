//! Text cleaning and sentiment labeling for short social-media posts.
//!
//! Two pipelines share one cleaning core:
//!
//! - **classifier** (Variant A): URLs, mentions and whole hashtags removed,
//!   letters only, fed to a pretrained multiclass model.
//! - **lexicon** (Variant B): hashtag words kept, stopwords dropped, tokens
//!   lemmatized, scored by a valence lexicon with thresholds on the compound.
//!
//! ```
//! use tonal_core::{LinguisticResources, SentimentPipeline};
//! use tonal_types::SentimentLabel;
//!
//! let pipeline = SentimentPipeline::builtin_lexicon(&LinguisticResources::builtin());
//! let out = pipeline.analyze("The new Google Pixel camera is amazing!").unwrap();
//! assert_eq!(out.label, SentimentLabel::Positive);
//! ```

#![warn(missing_docs)]

pub mod analyzer;
pub mod error;
pub mod label;
pub mod pipeline;
pub mod resources;
pub mod scoring;

pub use analyzer::TextNormalizer;
pub use error::{AnalyzeError, LoadError};
pub use pipeline::{Analysis, Backend, LazyResource, SentimentPipeline};
pub use resources::LinguisticResources;
pub use scoring::{Classifier, LinearTextModel, PolarityScorer, ValenceLexicon};

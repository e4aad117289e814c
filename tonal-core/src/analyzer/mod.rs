//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Cleans raw text (URLs, mentions, hashtags, non-letters)
//! - **Tokenizer**: Splits cleaned text into words
//! - **Stopwords / Lemmatizer / Refiner**: Token refinement for lexicon scoring

pub mod lemmatizer;
pub mod normalizer;
pub mod refiner;
pub mod stopwords;
pub mod tokenizer;

pub use lemmatizer::Lemmatizer;
pub use normalizer::{NormalizerConfig, TextNormalizer};
pub use refiner::TokenRefiner;
pub use stopwords::StopwordFilter;
pub use tokenizer::Tokenizer;

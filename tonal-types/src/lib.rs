//! Core types and traits for the Tonal sentiment tagger.
//!
//! This crate provides the value types that are shared across the Tonal
//! workspace. Keeping types separate ensures:
//!
//! - **Small values**: labels, scores and policies are `Copy`
//! - **Cross-crate compatibility**: core and demo share the same types
//! - **Clean boundaries**: no circular dependencies between crates

#![warn(missing_docs)]

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentiment assigned to a piece of text.
///
/// Three of the variants are the regular outcome of a classification.
/// [`SentimentLabel::Unknown`] is a sentinel: it is only produced when a
/// classifier answers with a class id outside of its declared range, and
/// it signals a broken model rather than anything the user did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    /// Negative sentiment (class id 0).
    Negative,
    /// Neutral sentiment (class id 1).
    Neutral,
    /// Positive sentiment (class id 2).
    Positive,
    /// Classifier contract violation.
    Unknown,
}

impl SentimentLabel {
    /// All labels a healthy pipeline can produce.
    pub const KNOWN: [SentimentLabel; 3] = [
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Positive,
    ];

    /// Display name, as shown to users.
    #[inline(always)]
    pub const fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Unknown => "Unknown",
        }
    }

    /// Returns `false` only for the [`SentimentLabel::Unknown`] sentinel.
    #[inline(always)]
    pub const fn is_known(self) -> bool {
        !matches!(self, SentimentLabel::Unknown)
    }

    /// Visual treatment used when presenting this label.
    #[inline(always)]
    pub const fn severity(self) -> Severity {
        match self {
            SentimentLabel::Positive => Severity::Success,
            SentimentLabel::Negative => Severity::Error,
            SentimentLabel::Neutral | SentimentLabel::Unknown => Severity::Info,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual severity of a rendered result.
///
/// Presenters map each severity to their own styling (colors, icons).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Good news (green).
    Success,
    /// Bad news (red).
    Error,
    /// Informational (blue).
    Info,
    /// Input problem shown before any computation (amber).
    Warning,
}

impl Severity {
    /// Lowercase name, usable as a CSS class.
    #[inline(always)]
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }
}

impl From<SentimentLabel> for Severity {
    #[inline(always)]
    fn from(label: SentimentLabel) -> Self {
        label.severity()
    }
}

/// Aggregate polarity produced by a lexicon scorer.
///
/// Always within `[-1.0, 1.0]`. Out-of-range values are clamped on
/// construction and NaN collapses to `0.0`, so every score maps to a
/// label. Deserialization goes through the same clamp.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(from = "f64", into = "f64")]
pub struct PolarityScore(f64);

impl PolarityScore {
    /// Neutral score.
    pub const ZERO: PolarityScore = PolarityScore(0.0);

    /// Creates a score, clamping into `[-1.0, 1.0]`.
    #[inline]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(-1.0, 1.0))
    }

    /// Returns the underlying value.
    #[inline(always)]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for PolarityScore {
    #[inline]
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<PolarityScore> for f64 {
    #[inline(always)]
    fn from(score: PolarityScore) -> Self {
        score.0
    }
}

impl fmt::Display for PolarityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Cut-offs used to turn a [`PolarityScore`] into a label.
///
/// Both bounds are inclusive: a score equal to `positive` is Positive and
/// a score equal to `negative` is Negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// Scores at or above this value are Positive. Default: 0.05
    pub positive: f64,
    /// Scores at or below this value are Negative. Default: -0.05
    pub negative: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: 0.05,
            negative: -0.05,
        }
    }
}

impl Thresholds {
    /// Creates thresholds from explicit bounds.
    pub const fn new(positive: f64, negative: f64) -> Self {
        Self { positive, negative }
    }

    /// Checks that both bounds are finite and do not overlap.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidThresholds`] otherwise.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.positive.is_finite()
            || !self.negative.is_finite()
            || self.positive < self.negative
        {
            return Err(ConfigError::InvalidThresholds {
                positive: self.positive,
                negative: self.negative,
            });
        }
        Ok(())
    }
}

/// What the normalizer does with `#hashtag` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashtagPolicy {
    /// Drop the marker and the tagged word (`#great` disappears).
    StripHashtagWords,
    /// Drop only the marker (`#great` becomes `great`).
    KeepHashtagText,
}

/// What the normalizer does with URLs and `@mentions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkPolicy {
    /// `http…` and `www…` runs and mentions vanish without a trace.
    Remove,
    /// `http…` and `www.…` runs and mentions each become a space, so the
    /// words around them stay apart.
    Separate,
}

/// Which scoring backend a pipeline runs.
///
/// Each variant carries its own cleaning policies, see
/// [`Variant::hashtag_policy`] and [`Variant::link_policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Pretrained multiclass model over cleaned text.
    Classifier,
    /// Valence lexicon over lemmatized tokens.
    Lexicon,
}

impl Variant {
    /// Name used in configuration and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Variant::Classifier => "classifier",
            Variant::Lexicon => "lexicon",
        }
    }

    /// Hashtag handling paired with this backend.
    pub const fn hashtag_policy(self) -> HashtagPolicy {
        match self {
            Variant::Classifier => HashtagPolicy::StripHashtagWords,
            Variant::Lexicon => HashtagPolicy::KeepHashtagText,
        }
    }

    /// URL and mention handling paired with this backend.
    pub const fn link_policy(self) -> LinkPolicy {
        match self {
            Variant::Classifier => LinkPolicy::Remove,
            Variant::Lexicon => LinkPolicy::Separate,
        }
    }

    /// Warning shown when a blank submission is rejected.
    pub const fn empty_input_warning(self) -> &'static str {
        match self {
            Variant::Classifier => "Please enter a tweet.",
            Variant::Lexicon => "Please enter some text.",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classifier" | "model" => Ok(Variant::Classifier),
            "lexicon" | "vader" => Ok(Variant::Lexicon),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Errors raised at the submission boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Submission was empty or contained only whitespace.
    #[error("submission is empty or whitespace-only")]
    Empty,
}

/// Errors in user-supplied configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Thresholds are not finite or overlap.
    #[error("invalid thresholds: positive={positive} must be >= negative={negative}, both finite")]
    InvalidThresholds {
        /// Configured positive bound.
        positive: f64,
        /// Configured negative bound.
        negative: f64,
    },
    /// Variant name not recognised.
    #[error("unknown variant '{0}', expected 'classifier' or 'lexicon'")]
    UnknownVariant(String),
}

/// A user submission that passed the boundary check.
///
/// The wrapped text is the original, untrimmed input: trimming is only
/// used to decide whether there is anything to analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Submission<'a>(&'a str);

impl<'a> Submission<'a> {
    /// Accepts any text that is non-empty after trimming.
    ///
    /// # Errors
    /// Returns [`InputError::Empty`] for empty or whitespace-only input.
    pub fn parse(text: &'a str) -> Result<Self, InputError> {
        if text.trim().is_empty() {
            return Err(InputError::Empty);
        }
        Ok(Self(text))
    }

    /// The submitted text, unmodified.
    #[inline(always)]
    pub const fn text(self) -> &'a str {
        self.0
    }
}

/// Values that may or may not carry text.
///
/// The normalizer accepts anything implementing this trait; values that
/// are not text normalize to the empty string instead of failing.
pub trait AsRawText {
    /// Returns the text, or `None` when the value is not a string.
    fn as_raw_text(&self) -> Option<&str>;
}

impl AsRawText for str {
    #[inline(always)]
    fn as_raw_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl AsRawText for String {
    #[inline(always)]
    fn as_raw_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: AsRawText + ?Sized> AsRawText for &T {
    #[inline(always)]
    fn as_raw_text(&self) -> Option<&str> {
        (**self).as_raw_text()
    }
}

impl<T: AsRawText> AsRawText for Option<T> {
    #[inline(always)]
    fn as_raw_text(&self) -> Option<&str> {
        self.as_ref().and_then(AsRawText::as_raw_text)
    }
}

impl AsRawText for serde_json::Value {
    #[inline(always)]
    fn as_raw_text(&self) -> Option<&str> {
        self.as_str()
    }
}

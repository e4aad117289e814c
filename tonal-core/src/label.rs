//! Label derivation.
//!
//! Both functions are total: every class id and every real number maps to
//! a label.

use tonal_types::{PolarityScore, SentimentLabel, Thresholds};

/// Maps a classifier class id to a label.
///
/// `0 → Negative`, `1 → Neutral`, `2 → Positive`; anything else is
/// [`SentimentLabel::Unknown`].
#[inline(always)]
pub const fn from_class_id(id: i64) -> SentimentLabel {
    match id {
        0 => SentimentLabel::Negative,
        1 => SentimentLabel::Neutral,
        2 => SentimentLabel::Positive,
        _ => SentimentLabel::Unknown,
    }
}

/// Maps a compound polarity to a label. Both thresholds are inclusive.
///
/// NaN compares false against both thresholds and lands on Neutral.
#[inline]
pub fn from_compound(score: f64, thresholds: &Thresholds) -> SentimentLabel {
    if score >= thresholds.positive {
        SentimentLabel::Positive
    } else if score <= thresholds.negative {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// [`from_compound`] for an already-clamped score.
#[inline]
pub fn from_polarity(score: PolarityScore, thresholds: &Thresholds) -> SentimentLabel {
    from_compound(score.value(), thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_ids_in_range() {
        assert_eq!(from_class_id(0), SentimentLabel::Negative);
        assert_eq!(from_class_id(1), SentimentLabel::Neutral);
        assert_eq!(from_class_id(2), SentimentLabel::Positive);
    }

    #[test]
    fn class_ids_out_of_range_are_unknown() {
        for id in [-1, 3, 4, 100, i64::MIN, i64::MAX] {
            assert_eq!(from_class_id(id), SentimentLabel::Unknown, "id {id}");
        }
    }

    #[test]
    fn compound_boundaries_are_inclusive() {
        let t = Thresholds::default();
        assert_eq!(from_compound(0.05, &t), SentimentLabel::Positive);
        assert_eq!(from_compound(-0.05, &t), SentimentLabel::Negative);
        assert_eq!(from_compound(0.0, &t), SentimentLabel::Neutral);
    }

    #[test]
    fn compound_just_inside_neutral_band() {
        let t = Thresholds::default();
        assert_eq!(from_compound(0.0499, &t), SentimentLabel::Neutral);
        assert_eq!(from_compound(-0.0499, &t), SentimentLabel::Neutral);
    }

    #[test]
    fn compound_extremes() {
        let t = Thresholds::default();
        assert_eq!(from_compound(1.0, &t), SentimentLabel::Positive);
        assert_eq!(from_compound(-1.0, &t), SentimentLabel::Negative);
        assert_eq!(from_compound(f64::INFINITY, &t), SentimentLabel::Positive);
        assert_eq!(from_compound(f64::NEG_INFINITY, &t), SentimentLabel::Negative);
    }

    #[test]
    fn nan_is_neutral() {
        assert_eq!(
            from_compound(f64::NAN, &Thresholds::default()),
            SentimentLabel::Neutral
        );
    }

    #[test]
    fn custom_thresholds() {
        let t = Thresholds::new(0.5, -0.5);
        assert_eq!(from_compound(0.3, &t), SentimentLabel::Neutral);
        assert_eq!(from_compound(0.5, &t), SentimentLabel::Positive);
        assert_eq!(from_polarity(PolarityScore::new(-0.7), &t), SentimentLabel::Negative);
    }

    #[test]
    fn zero_width_band() {
        let t = Thresholds::new(0.0, 0.0);
        assert_eq!(from_compound(0.0, &t), SentimentLabel::Positive);
        assert_eq!(from_compound(-0.001, &t), SentimentLabel::Negative);
    }
}

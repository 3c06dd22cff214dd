//! Weighted normalised similarity scoring and secondary-score blending.
//!
//! A match score compares one candidate against the learned preference
//! vector, feature by feature, inside the pool's observed value ranges.
//! Scores are percentages rounded to one decimal so they are stable to
//! display and to compare in tests.

use thiserror::Error;
use wayfarer_core::{Destination, Feature, FeatureRanges, PreferenceVector, StyleProfile};

/// Score returned when nothing is known: empty preference, or no weighted
/// feature shared between preference and candidate.
pub const NEUTRAL_SCORE: f32 = 50.0;

/// Relative weight of the secondary score when blending, in `0..=1`.
///
/// # Examples
/// ```
/// use wayfarer_match::BlendWeight;
///
/// let weight = BlendWeight::new(0.3)?;
/// assert!((weight.value() - 0.3).abs() < f32::EPSILON);
/// assert!(BlendWeight::new(1.5).is_err());
/// # Ok::<(), wayfarer_match::BlendWeightError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeight(f32);

/// Errors returned by [`BlendWeight::new`].
#[derive(Debug, Error, PartialEq)]
pub enum BlendWeightError {
    /// The weight was non-finite or outside `0..=1`.
    #[error("blend weight {value} must lie in 0..=1")]
    OutOfRange {
        /// Offending value.
        value: f32,
    },
}

impl BlendWeight {
    /// Validate and construct a blend weight.
    ///
    /// # Errors
    /// Returns [`BlendWeightError::OutOfRange`] for non-finite values or
    /// values outside `0..=1`.
    pub fn new(value: f32) -> Result<Self, BlendWeightError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(BlendWeightError::OutOfRange { value });
        }
        Ok(Self(value))
    }

    /// The inner weight.
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Default for BlendWeight {
    /// The secondary signal gets a 20% say by default.
    fn default() -> Self {
        Self(0.2)
    }
}

/// Score how well a candidate matches the learned preference, as a
/// percentage in `0..=100`.
///
/// Only features carrying a non-zero style weight and present on both the
/// preference and the candidate participate; everything else is silently
/// skipped. Negative weights flip the comparison to "lower is better":
/// candidates at or below the learned level score full marks and those above
/// are penalised by how far they overshoot.
///
/// Returns [`NEUTRAL_SCORE`] when the preference is empty (cold start) or no
/// weighted feature is shared.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "similarity scoring is weighted floating-point averaging"
)]
pub fn match_score(
    destination: &Destination,
    preference: &PreferenceVector,
    ranges: &FeatureRanges,
    profile: &StyleProfile,
) -> f32 {
    if preference.is_empty() {
        return NEUTRAL_SCORE;
    }

    let mut weighted_similarity = 0.0_f32;
    let mut total_weight = 0.0_f32;
    for (feature, pref, value, weight) in shared_features(destination, preference, profile) {
        let similarity = feature_similarity(
            ranges.normalise(feature, value),
            ranges.normalise(feature, pref),
            weight,
        );
        weighted_similarity += similarity * weight.abs();
        total_weight += weight.abs();
    }

    if total_weight == 0.0 {
        return NEUTRAL_SCORE;
    }
    round_to_tenth((weighted_similarity / total_weight * 100.0).clamp(0.0, 100.0))
}

/// Merge a match score with an externally supplied secondary score.
///
/// The caller resolves missing secondary signals to the neutral 50.0 before
/// blending; this function never sees an absent value.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "blending is a weighted average")]
pub fn blend(match_score: f32, secondary_score: f32, weight: BlendWeight) -> f32 {
    let w = weight.value();
    round_to_tenth(match_score * (1.0 - w) + secondary_score * w)
}

/// One feature's contribution to a match score, for explaining results.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureContribution {
    /// Feature being compared.
    pub feature: Feature,
    /// The candidate's raw value.
    pub destination_value: f32,
    /// The learned preference value.
    pub preference_value: f32,
    /// Displayed similarity percentage after direction handling.
    pub similarity: f32,
    /// Style weight applied.
    pub weight: f32,
    /// True when a negative weight flipped the comparison.
    pub inverted: bool,
}

/// Per-feature breakdown of a match score, in canonical feature order.
///
/// Skips exactly the pairs [`match_score`] skips, so the breakdown always
/// explains the score actually produced.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "breakdown recomputes the per-feature similarity terms"
)]
pub fn match_breakdown(
    destination: &Destination,
    preference: &PreferenceVector,
    ranges: &FeatureRanges,
    profile: &StyleProfile,
) -> Vec<FeatureContribution> {
    shared_features(destination, preference, profile)
        .map(|(feature, pref, value, weight)| {
            let similarity = feature_similarity(
                ranges.normalise(feature, value),
                ranges.normalise(feature, pref),
                weight,
            );
            FeatureContribution {
                feature,
                destination_value: value,
                preference_value: pref,
                similarity: round_to_tenth((similarity * 100.0).clamp(0.0, 100.0)),
                weight,
                inverted: weight < 0.0,
            }
        })
        .collect()
}

/// Features participating in scoring: non-zero weight, present on both sides.
fn shared_features<'a>(
    destination: &'a Destination,
    preference: &'a PreferenceVector,
    profile: &'a StyleProfile,
) -> impl Iterator<Item = (Feature, f32, f32, f32)> + 'a {
    Feature::ALL.into_iter().filter_map(move |feature| {
        let weight = profile.weight(feature).filter(|&w| w != 0.0)?;
        let pref = preference.value(feature)?;
        let value = destination.feature(feature)?;
        Some((feature, pref, value, weight))
    })
}

#[expect(
    clippy::float_arithmetic,
    reason = "similarity is defined on normalised distances"
)]
fn feature_similarity(norm_dest: f32, norm_pref: f32, weight: f32) -> f32 {
    if weight < 0.0 {
        // Lower-is-better: full credit at or below the learned level, linear
        // penalty for overshooting it.
        1.0 - (norm_dest - norm_pref).max(0.0)
    } else {
        1.0 - (norm_dest - norm_pref).abs()
    }
}

#[expect(clippy::float_arithmetic, reason = "fixed-point display rounding")]
pub(crate) fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

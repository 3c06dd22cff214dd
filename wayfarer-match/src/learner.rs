//! Preference learning from confirmed picks.
//!
//! The learner is the whole of the "model": the per-feature mean of what the
//! user chose. It is recomputed from scratch on every call, which keeps it
//! trivially correct for the handful of picks a session produces.

use wayfarer_core::{Destination, Feature, PreferenceVector};

/// Derive a preference vector from the destinations a user picked.
///
/// For every feature rated by at least one pick, the learned value is the
/// mean over the picks that rate it; picks missing the feature are excluded
/// from that feature's average rather than counted as zero. An empty slice
/// yields the empty (cold-start) vector.
///
/// # Examples
/// ```
/// use wayfarer_core::{Destination, Feature};
/// use wayfarer_match::learn;
///
/// # fn main() -> Result<(), wayfarer_core::FeatureValueError> {
/// let chosen = vec![
///     Destination::new(1, "A", "X").with_feature(Feature::Beach, 3.0)?,
///     Destination::new(2, "B", "X").with_feature(Feature::Beach, 5.0)?,
/// ];
/// let preference = learn(&chosen);
/// assert_eq!(preference.value(Feature::Beach), Some(4.0));
/// # Ok(())
/// # }
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "averaging feature values is floating-point by nature; pick counts are tiny"
)]
pub fn learn(chosen: &[Destination]) -> PreferenceVector {
    Feature::ALL
        .into_iter()
        .filter_map(|feature| {
            let mut sum = 0.0_f32;
            let mut count = 0_u32;
            for value in chosen.iter().filter_map(|dest| dest.feature(feature)) {
                sum += value;
                count += 1;
            }
            (count > 0).then(|| (feature, sum / count as f32))
        })
        .collect()
}

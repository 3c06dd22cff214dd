//! Temperature-based secondary scoring.
//!
//! The engine treats weather as one possible source of the secondary
//! signal: callers fetch a forecast, turn it into a [`SecondaryScore`]
//! here, and attach it to the destination before ranking.

use std::ops::RangeInclusive;

use wayfarer_core::SecondaryScore;

/// Score an observed temperature against the traveller's comfort range.
///
/// Temperatures inside the range score a full 100. Outside it, the score
/// drops 15 points for every 5 degrees Celsius of deviation from the
/// nearest bound, bottoming out at zero.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the score is a linear ramp on temperature deviation"
)]
pub fn temperature_score(observed: f32, preferred: &RangeInclusive<f32>) -> f32 {
    if preferred.contains(&observed) {
        return 100.0;
    }
    let deviation = if observed < *preferred.start() {
        *preferred.start() - observed
    } else {
        observed - *preferred.end()
    };
    (100.0 - deviation / 5.0 * 15.0).max(0.0)
}

/// Build a secondary score from an optional temperature observation.
///
/// Missing or non-finite observations produce the neutral score so ranking
/// still works when no forecast is available.
#[must_use]
pub fn secondary_from_temperature(
    observed: Option<f32>,
    preferred: &RangeInclusive<f32>,
) -> SecondaryScore {
    observed
        .filter(|value| value.is_finite())
        .map_or_else(SecondaryScore::neutral, |value| {
            SecondaryScore::new(temperature_score(value, preferred))
                .map(|secondary| secondary.with_temperature(value))
                .unwrap_or_else(|_| SecondaryScore::neutral())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(20.0, 100.0)]
    #[case(18.0, 100.0)]
    #[case(26.0, 100.0)]
    #[case(31.0, 85.0)]
    #[case(13.0, 85.0)]
    #[case(36.0, 70.0)]
    #[case(80.0, 0.0)]
    #[expect(
        clippy::float_arithmetic,
        reason = "test compares floating point scores"
    )]
    fn ramps_down_outside_the_comfort_range(#[case] observed: f32, #[case] expected: f32) {
        let score = temperature_score(observed, &(18.0..=26.0));
        assert!((score - expected).abs() < 1e-4, "got {score}");
    }

    #[test]
    fn missing_observation_is_neutral() {
        let secondary = secondary_from_temperature(None, &(18.0..=26.0));
        assert!((secondary.score - 50.0).abs() < f32::EPSILON);
        assert!(secondary.temperature.is_none());
    }

    #[test]
    fn non_finite_observation_is_neutral() {
        let secondary = secondary_from_temperature(Some(f32::NAN), &(18.0..=26.0));
        assert!((secondary.score - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn observation_carries_through_to_the_score() {
        let secondary = secondary_from_temperature(Some(31.0), &(18.0..=26.0));
        assert!((secondary.score - 85.0).abs() < 1e-4);
        assert_eq!(secondary.temperature, Some(31.0));
    }
}

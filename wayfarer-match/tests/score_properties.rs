//! Property-based tests for scoring and learning.
//!
//! # Invariants tested
//!
//! - **Score bounds:** Match and blended scores always land in `0..=100`.
//! - **Learned bounds:** A learned value never escapes the range of the
//!   observed values it averages.
//! - **Range sanity:** Pool-derived feature ranges keep `min <= max` and
//!   normalise into `0..=1`.

use proptest::prelude::*;
use wayfarer_core::{Destination, Feature, FeatureRanges, StyleProfile};
use wayfarer_match::{blend, learn, match_score, BlendWeight};

/// Strategy producing a destination rating a handful of one-to-five features.
fn destination_strategy(id: u64) -> impl Strategy<Value = Destination> {
    proptest::collection::vec((0_usize..Feature::QUALITATIVE.len(), 1.0_f32..=5.0), 1..6).prop_map(
        move |ratings| {
            let mut dest = Destination::new(id, format!("gen-{id}"), "Propland");
            for (index, value) in ratings {
                let feature = Feature::QUALITATIVE
                    .get(index)
                    .copied()
                    .expect("index drawn within bounds");
                dest.set_feature(feature, value).expect("value drawn in scale");
            }
            dest
        },
    )
}

fn pool_strategy() -> impl Strategy<Value = Vec<Destination>> {
    proptest::collection::vec(0_u64..1000, 2..10).prop_flat_map(|ids| {
        ids.into_iter()
            .enumerate()
            .map(|(offset, id)| destination_strategy(id + (offset as u64) * 1000))
            .collect::<Vec<_>>()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: every match score stays within the percentage range, for
    /// any pool, pick set, and the default style weights.
    #[test]
    fn match_scores_stay_in_percentage_range(
        pool in pool_strategy(),
        chosen in pool_strategy(),
    ) {
        let preference = learn(&chosen);
        let ranges = FeatureRanges::from_pool(&pool);
        let profile = StyleProfile::default_weights();
        for candidate in &pool {
            let score = match_score(candidate, &preference, &ranges, &profile);
            prop_assert!((0.0..=100.0).contains(&score), "score {score} out of range");
        }
    }

    /// Property: blending two in-range scores cannot escape the range.
    #[test]
    fn blended_scores_stay_in_percentage_range(
        match_part in 0.0_f32..=100.0,
        secondary in 0.0_f32..=100.0,
        weight in 0.0_f32..=1.0,
    ) {
        let blended = blend(match_part, secondary, BlendWeight::new(weight).expect("in range"));
        prop_assert!((0.0..=100.0).contains(&blended));
    }

    /// Property: a learned feature value is bracketed by the minimum and
    /// maximum the picks actually rated for that feature.
    #[test]
    fn learned_values_stay_within_observed_bounds(chosen in pool_strategy()) {
        let preference = learn(&chosen);
        for (feature, learned) in preference.iter() {
            let observed: Vec<f32> = chosen
                .iter()
                .filter_map(|dest| dest.feature(feature))
                .collect();
            let min = observed.iter().copied().fold(f32::INFINITY, f32::min);
            let max = observed.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            prop_assert!(learned >= min - 1e-4 && learned <= max + 1e-4,
                "learned {learned} outside [{min}, {max}] for {feature}");
        }
    }

    /// Property: pool-derived ranges are well formed and normalisation maps
    /// observed values into the unit interval.
    #[test]
    fn ranges_normalise_into_the_unit_interval(pool in pool_strategy()) {
        let ranges = FeatureRanges::from_pool(&pool);
        for feature in Feature::ALL {
            let (lo, hi) = ranges.span(feature);
            prop_assert!(lo <= hi);
            for dest in &pool {
                if let Some(value) = dest.feature(feature) {
                    let norm = ranges.normalise(feature, value);
                    prop_assert!((0.0..=1.0).contains(&norm), "norm {norm} for {feature}");
                }
            }
        }
    }
}

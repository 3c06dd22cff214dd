//! Nearest-neighbour lookup for "more like this" suggestions.

use wayfarer_core::{Destination, Feature, FeatureRanges};

use crate::score::round_to_tenth;

/// A destination together with its similarity to the lookup target.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarDestination {
    /// The similar destination.
    pub destination: Destination,
    /// Similarity percentage in `0..=100`, rounded to one decimal.
    pub similarity: f32,
}

/// Find up to `k` destinations most similar to `target`.
///
/// Similarity is the mean per-feature closeness over the qualitative
/// features both destinations rate, normalised within the pool's observed
/// ranges. Budget is deliberately excluded so an expensive city can still
/// surface its cheaper twins. Candidates sharing no rated feature with the
/// target fall back to a neutral 50.0, and the target itself is never
/// returned.
///
/// Results come back highest similarity first; ties keep pool order.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "similarity is an average of normalised distances over few features"
)]
pub fn find_similar(target: &Destination, pool: &[Destination], k: usize) -> Vec<SimilarDestination> {
    let ranges = FeatureRanges::from_pool(pool);
    let mut similar: Vec<SimilarDestination> = pool
        .iter()
        .filter(|candidate| candidate.id != target.id)
        .map(|candidate| {
            let mut closeness = 0.0_f32;
            let mut shared = 0_u32;
            for feature in Feature::QUALITATIVE {
                let (Some(a), Some(b)) = (target.feature(feature), candidate.feature(feature))
                else {
                    continue;
                };
                let distance = (ranges.normalise(feature, a) - ranges.normalise(feature, b)).abs();
                closeness += (1.0 - distance).clamp(0.0, 1.0);
                shared += 1;
            }
            let similarity = if shared == 0 {
                50.0
            } else {
                round_to_tenth(closeness / shared as f32 * 100.0)
            };
            SimilarDestination {
                destination: candidate.clone(),
                similarity,
            }
        })
        .collect();

    similar.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    similar.truncate(k);
    similar
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_core::test_support::destination;

    fn coastal_pool() -> Vec<Destination> {
        vec![
            destination(1, "lagoon", &[(Feature::Beach, 5.0), (Feature::Food, 3.0)]),
            destination(2, "cove", &[(Feature::Beach, 5.0), (Feature::Food, 3.0)]),
            destination(3, "steppe", &[(Feature::Beach, 1.0), (Feature::Food, 3.0)]),
            destination(4, "uncharted", &[(Feature::Nightlife, 2.0)]),
        ]
    }

    #[test]
    fn identical_twin_ranks_first_with_full_similarity() {
        let pool = coastal_pool();
        let target = pool.first().expect("pool is non-empty").clone();
        let similar = find_similar(&target, &pool, 2);

        let top = similar.first().expect("at least one neighbour");
        assert_eq!(top.destination.id, 2);
        assert!((top.similarity - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn target_is_excluded_from_its_own_neighbours() {
        let pool = coastal_pool();
        let target = pool.first().expect("pool is non-empty").clone();
        let similar = find_similar(&target, &pool, 10);
        assert!(similar.iter().all(|s| s.destination.id != target.id));
    }

    #[test]
    fn no_shared_features_falls_back_to_neutral() {
        let pool = coastal_pool();
        let target = pool.first().expect("pool is non-empty").clone();
        let similar = find_similar(&target, &pool, 10);
        let stranger = similar
            .iter()
            .find(|s| s.destination.id == 4)
            .expect("stranger present");
        assert!((stranger.similarity - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn budget_does_not_count_towards_similarity() {
        let target = destination(1, "a", &[(Feature::DailyBudget, 50.0)]);
        let pool = vec![
            target.clone(),
            destination(2, "b", &[(Feature::DailyBudget, 50.0)]),
        ];
        let similar = find_similar(&target, &pool, 1);
        // Budget is the only overlap, and it is excluded, so the match is
        // the neutral fallback rather than a perfect score.
        let only = similar.first().expect("one neighbour");
        assert!((only.similarity - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn k_caps_the_result_length() {
        let pool = coastal_pool();
        let target = pool.first().expect("pool is non-empty").clone();
        assert_eq!(find_similar(&target, &pool, 1).len(), 1);
        assert_eq!(find_similar(&target, &pool, 0).len(), 0);
    }
}

//! End-to-end ranking of a candidate pool against a user's picks.

use wayfarer_core::{Destination, FeatureRanges, ScoredDestination, StyleProfile};

use crate::learner::learn;
use crate::score::{self, BlendWeight};

/// Rank a candidate pool against the preference learned from `chosen`.
///
/// Value ranges are computed over the pool being ranked, so normalisation
/// always reflects the candidates actually on offer. The result is sorted by
/// combined score, highest first; equal scores keep their pool order.
///
/// When `use_secondary` is false the secondary signal is ignored entirely
/// and the combined score equals the match score.
#[must_use]
pub fn rank(
    pool: &[Destination],
    chosen: &[Destination],
    profile: &StyleProfile,
    use_secondary: bool,
    blend_weight: BlendWeight,
) -> Vec<ScoredDestination> {
    let preference = learn(chosen);
    let ranges = FeatureRanges::from_pool(pool);
    log::debug!(
        "ranking {} candidates from {} picks (secondary: {use_secondary})",
        pool.len(),
        chosen.len()
    );

    let mut ranked: Vec<ScoredDestination> = pool
        .iter()
        .map(|destination| {
            let match_score = score::match_score(destination, &preference, &ranges, profile);
            let secondary_score = score::round_to_tenth(destination.secondary_score_or_neutral());
            let combined_score = if use_secondary {
                score::blend(match_score, secondary_score, blend_weight)
            } else {
                match_score
            };
            ScoredDestination {
                destination: destination.clone(),
                match_score,
                secondary_score,
                combined_score,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.combined_score.total_cmp(&a.combined_score));
    ranked
}

//! Explore/exploit round scheduling.
//!
//! A session walks through a fixed number of rounds. Early rounds explore
//! the catalogue uniformly at random; once enough picks exist, later rounds
//! exploit the learned preference, mixing top-ranked candidates with a wild
//! card drawn from the long tail. Selection for a given round is a pure
//! function of the seed and the session state, so re-presenting a round
//! after a crash or refresh shows the same candidates.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wayfarer_core::{Destination, RoundState, StyleProfile};

use crate::ranking::rank;
use crate::score::BlendWeight;

/// Tunable parameters of the round scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    /// Total rounds in a session.
    pub rounds: u32,
    /// Candidates shown per round.
    pub per_round: usize,
    /// Rounds that explore regardless of how many picks exist.
    pub explore_rounds: u32,
    /// Minimum picks required before exploitation starts.
    pub min_chosen: usize,
    /// Size of the top-ranked pool exploited rounds draw from.
    pub exploit_pool: usize,
    /// How many of the shown candidates come from that top pool; the rest
    /// are wild cards from the remainder of the ranking.
    pub exploit_top_picks: usize,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            rounds: 7,
            per_round: 3,
            explore_rounds: 3,
            min_chosen: 3,
            exploit_pool: 10,
            exploit_top_picks: 2,
        }
    }
}

/// Which strategy a round uses to pick its candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// Uniform random draw from the unseen pool.
    Explore,
    /// Preference-driven draw biased towards top-ranked candidates.
    Exploit,
}

/// Deterministic candidate selector for a session.
#[derive(Debug, Clone, Copy)]
pub struct RoundSelector {
    config: RoundConfig,
    seed: u64,
}

impl RoundSelector {
    /// Selector with the default configuration.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, RoundConfig::default())
    }

    /// Selector with an explicit configuration.
    #[must_use]
    pub const fn with_config(seed: u64, config: RoundConfig) -> Self {
        Self { config, seed }
    }

    /// The configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Strategy the next round will use.
    ///
    /// Exploration continues past the configured explore rounds until the
    /// user has confirmed enough picks to learn from.
    #[must_use]
    pub fn phase(&self, state: &RoundState) -> SelectionPhase {
        if state.round() < self.config.explore_rounds || state.chosen().len() < self.config.min_chosen
        {
            SelectionPhase::Explore
        } else {
            SelectionPhase::Exploit
        }
    }

    /// Whether the session has used up its rounds.
    #[must_use]
    pub fn is_complete(&self, state: &RoundState) -> bool {
        state.round() >= self.config.rounds
    }

    /// Candidates to show for the next round.
    ///
    /// Destinations already shown in earlier rounds never reappear. Returns
    /// fewer than `per_round` candidates when the unseen pool is running
    /// out, and an empty vector when it is exhausted.
    ///
    /// Calling this twice with the same pool and state yields the same
    /// candidates; the random draw is re-derived from the seed and the
    /// round number rather than consumed from shared mutable state.
    #[must_use]
    pub fn select(
        &self,
        pool: &[Destination],
        state: &RoundState,
        profile: &StyleProfile,
        use_secondary: bool,
        blend_weight: BlendWeight,
    ) -> Vec<Destination> {
        let remaining: Vec<Destination> = pool
            .iter()
            .filter(|dest| !state.was_shown(dest.id))
            .cloned()
            .collect();
        if remaining.is_empty() {
            return Vec::new();
        }

        let mut rng = self.round_rng(state.round());
        let mut selection = match self.phase(state) {
            SelectionPhase::Explore => {
                if remaining.len() <= self.config.per_round {
                    remaining
                } else {
                    remaining
                        .choose_multiple(&mut rng, self.config.per_round)
                        .cloned()
                        .collect()
                }
            }
            SelectionPhase::Exploit => {
                self.exploit(remaining, state, profile, use_secondary, blend_weight, &mut rng)
            }
        };
        selection.shuffle(&mut rng);
        log::debug!(
            "round {} shows {} of {} unseen candidates",
            state.round(),
            selection.len(),
            pool.len()
        );
        selection
    }

    fn exploit(
        &self,
        remaining: Vec<Destination>,
        state: &RoundState,
        profile: &StyleProfile,
        use_secondary: bool,
        blend_weight: BlendWeight,
        rng: &mut ChaCha8Rng,
    ) -> Vec<Destination> {
        let ranked = rank(&remaining, state.chosen(), profile, use_secondary, blend_weight);
        if ranked.len() <= self.config.per_round {
            return ranked.into_iter().map(|scored| scored.destination).collect();
        }

        let mut top = ranked;
        let tail = top.split_off(top.len().min(self.config.exploit_pool));

        let mut selection: Vec<Destination> = top
            .choose_multiple(rng, self.config.exploit_top_picks)
            .map(|scored| scored.destination.clone())
            .collect();
        if let Some(wild) = tail.choose(rng) {
            selection.push(wild.destination.clone());
        }
        // Backfill in rank order when the tail could not supply a wild card.
        for scored in top.iter().chain(tail.iter()) {
            if selection.len() >= self.config.per_round {
                break;
            }
            if !selection.iter().any(|dest| dest.id == scored.destination.id) {
                selection.push(scored.destination.clone());
            }
        }
        selection
    }

    fn round_rng(&self, round: u32) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(
            self.seed ^ u64::from(round).wrapping_mul(0x9E37_79B9_7F4A_7C15),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_core::test_support::destination;
    use wayfarer_core::Feature;

    fn pool(size: u64) -> Vec<Destination> {
        (1..=size)
            .map(|id| {
                #[expect(clippy::cast_precision_loss, reason = "ids are tiny in tests")]
                let beach = (id % 5 + 1) as f32;
                destination(id, &format!("dest-{id}"), &[(Feature::Beach, beach)])
            })
            .collect()
    }

    fn advance(state: &RoundState, shown: &[Destination]) -> RoundState {
        let pick = shown.first().expect("round must show candidates");
        state.record_choice(pick.id, shown).expect("pick was shown")
    }

    #[test]
    fn early_rounds_explore() {
        let selector = RoundSelector::new(7);
        assert_eq!(selector.phase(&RoundState::new()), SelectionPhase::Explore);
    }

    #[test]
    fn exploration_extends_until_enough_picks() {
        let selector = RoundSelector::new(7);
        let pool = pool(30);
        let mut state = RoundState::new();
        // Four explore rounds picking once each: rounds 0..3 are forced
        // explore, and round 3 still explores if fewer than three picks.
        for _ in 0..3 {
            let shown = selector.select(&pool, &state, &StyleProfile::default_weights(), false, BlendWeight::default());
            state = advance(&state, &shown);
        }
        assert_eq!(selector.phase(&state), SelectionPhase::Exploit);
    }

    #[test]
    fn selection_is_repeatable_for_the_same_state() {
        let selector = RoundSelector::new(42);
        let pool = pool(40);
        let state = RoundState::new();
        let profile = StyleProfile::default_weights();

        let first = selector.select(&pool, &state, &profile, false, BlendWeight::default());
        let second = selector.select(&pool, &state, &profile, false, BlendWeight::default());
        let first_ids: Vec<u64> = first.iter().map(|d| d.id).collect();
        let second_ids: Vec<u64> = second.iter().map(|d| d.id).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn shown_candidates_never_repeat_across_rounds() {
        let selector = RoundSelector::new(3);
        let pool = pool(40);
        let profile = StyleProfile::default_weights();
        let mut state = RoundState::new();
        let mut seen = std::collections::HashSet::new();

        while !selector.is_complete(&state) {
            let shown = selector.select(&pool, &state, &profile, false, BlendWeight::default());
            assert_eq!(shown.len(), 3);
            for dest in &shown {
                assert!(seen.insert(dest.id), "destination {} repeated", dest.id);
            }
            state = advance(&state, &shown);
        }
        assert_eq!(state.chosen().len(), 7);
    }

    #[test]
    fn small_pool_shrinks_and_then_exhausts() {
        let selector = RoundSelector::new(11);
        let pool = pool(4);
        let profile = StyleProfile::default_weights();
        let state = RoundState::new();

        let shown = selector.select(&pool, &state, &profile, false, BlendWeight::default());
        let state = advance(&state, &shown);
        // Round one consumed three candidates; one remains.
        let shown = selector.select(&pool, &state, &profile, false, BlendWeight::default());
        assert_eq!(shown.len(), 1);
        let state = advance(&state, &shown);
        assert!(selector
            .select(&pool, &state, &profile, false, BlendWeight::default())
            .is_empty());
    }

    #[test]
    fn exploit_rounds_show_the_configured_count() {
        let selector = RoundSelector::new(5);
        let pool = pool(60);
        let profile = StyleProfile::default_weights();
        let mut state = RoundState::new();
        for _ in 0..3 {
            let shown = selector.select(&pool, &state, &profile, false, BlendWeight::default());
            state = advance(&state, &shown);
        }

        assert_eq!(selector.phase(&state), SelectionPhase::Exploit);
        let shown = selector.select(&pool, &state, &profile, false, BlendWeight::default());
        assert_eq!(shown.len(), 3);
    }
}

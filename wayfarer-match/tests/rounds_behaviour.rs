//! Behavioural tests for a full explore/exploit session.

use std::collections::HashSet;

use wayfarer_core::{Destination, Feature, RoundState, StyleProfile};
use wayfarer_match::{BlendWeight, RoundConfig, RoundSelector, SelectionPhase};

fn catalogue() -> Vec<Destination> {
    (1..=40_u64)
        .map(|id| {
            let beach = (id % 5 + 1) as f32;
            let culture = (id % 3 + 2) as f32;
            let mut dest = Destination::new(id, format!("city-{id}"), "Testland");
            dest.set_feature(Feature::Beach, beach).expect("in scale");
            dest.set_feature(Feature::Culture, culture).expect("in scale");
            dest
        })
        .collect()
}

fn pick_first(selector: &RoundSelector, pool: &[Destination], state: &RoundState) -> RoundState {
    let shown = selector.select(
        pool,
        state,
        &StyleProfile::default_weights(),
        false,
        BlendWeight::default(),
    );
    let pick = shown.first().expect("round shows candidates");
    state.record_choice(pick.id, &shown).expect("pick was shown")
}

#[test]
fn a_full_session_runs_seven_rounds_without_repeats() {
    let selector = RoundSelector::new(2024);
    let pool = catalogue();
    let mut state = RoundState::new();
    let mut seen: HashSet<u64> = HashSet::new();

    while !selector.is_complete(&state) {
        let shown = selector.select(
            &pool,
            &state,
            &StyleProfile::default_weights(),
            false,
            BlendWeight::default(),
        );
        assert_eq!(shown.len(), 3);
        for dest in &shown {
            assert!(seen.insert(dest.id), "destination {} shown twice", dest.id);
        }
        let pick = shown.first().expect("round shows candidates");
        state = state.record_choice(pick.id, &shown).expect("pick was shown");
    }

    assert_eq!(state.round(), 7);
    assert_eq!(state.chosen().len(), 7);
    assert_eq!(state.shown_ids().len(), 21);
}

#[test]
fn the_phase_flips_to_exploit_after_three_picks() {
    let selector = RoundSelector::new(7);
    let pool = catalogue();
    let mut state = RoundState::new();

    for _ in 0..3 {
        assert_eq!(selector.phase(&state), SelectionPhase::Explore);
        state = pick_first(&selector, &pool, &state);
    }
    assert_eq!(selector.phase(&state), SelectionPhase::Exploit);
}

#[test]
fn reshowing_a_round_is_idempotent() {
    let selector = RoundSelector::new(99);
    let pool = catalogue();
    let mut state = RoundState::new();
    // Advance into the exploit phase so both strategies are covered.
    for _ in 0..4 {
        let first: Vec<u64> = selector
            .select(
                &pool,
                &state,
                &StyleProfile::default_weights(),
                false,
                BlendWeight::default(),
            )
            .iter()
            .map(|d| d.id)
            .collect();
        let again: Vec<u64> = selector
            .select(
                &pool,
                &state,
                &StyleProfile::default_weights(),
                false,
                BlendWeight::default(),
            )
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(first, again, "round {} not repeatable", state.round());
        state = pick_first(&selector, &pool, &state);
    }
}

#[test]
fn different_seeds_explore_differently() {
    let pool = catalogue();
    let state = RoundState::new();
    let profile = StyleProfile::default_weights();

    let runs: HashSet<Vec<u64>> = (0..8_u64)
        .map(|seed| {
            RoundSelector::new(seed)
                .select(&pool, &state, &profile, false, BlendWeight::default())
                .iter()
                .map(|d| d.id)
                .collect()
        })
        .collect();
    // Eight seeds over forty candidates should not all collide.
    assert!(runs.len() > 1);
}

#[test]
fn a_tiny_catalogue_ends_the_session_early() {
    let selector = RoundSelector::new(5);
    let pool: Vec<Destination> = catalogue().into_iter().take(5).collect();
    let mut state = RoundState::new();

    let shown = selector.select(
        &pool,
        &state,
        &StyleProfile::default_weights(),
        false,
        BlendWeight::default(),
    );
    assert_eq!(shown.len(), 3);
    state = pick_first(&selector, &pool, &state);

    let shown = selector.select(
        &pool,
        &state,
        &StyleProfile::default_weights(),
        false,
        BlendWeight::default(),
    );
    assert_eq!(shown.len(), 2);
    state = state
        .record_choice(shown.first().expect("non-empty").id, &shown)
        .expect("pick was shown");

    assert!(selector
        .select(
            &pool,
            &state,
            &StyleProfile::default_weights(),
            false,
            BlendWeight::default(),
        )
        .is_empty());
}

#[test]
fn custom_configs_change_the_cadence() {
    let config = RoundConfig {
        rounds: 2,
        per_round: 4,
        explore_rounds: 1,
        min_chosen: 1,
        ..RoundConfig::default()
    };
    let selector = RoundSelector::with_config(31, config);
    let pool = catalogue();
    let mut state = RoundState::new();

    let shown = selector.select(
        &pool,
        &state,
        &StyleProfile::default_weights(),
        false,
        BlendWeight::default(),
    );
    assert_eq!(shown.len(), 4);
    state = state
        .record_choice(shown.first().expect("non-empty").id, &shown)
        .expect("pick was shown");
    assert_eq!(selector.phase(&state), SelectionPhase::Exploit);

    state = pick_first(&selector, &pool, &state);
    assert!(selector.is_complete(&state));
}

//! Matching algorithms for the Wayfarer destination-matching engine.
//!
//! The crate turns a user's confirmed picks into recommendations in four
//! steps: [`learn`] derives a preference vector from the picks, [`rank`]
//! scores a candidate pool against it, [`estimate`](confidence::estimate)
//! reports how decisive the winner is, and [`RoundSelector`] schedules the
//! explore/exploit rounds that gather the picks in the first place.
//!
//! All scores are percentages in `0..=100`, rounded to one decimal. Ranking
//! is deterministic: equal scores keep their pool order, and round selection
//! is a pure function of the seed and the session state.

#![forbid(unsafe_code)]

mod confidence;
mod insights;
mod learner;
mod ranking;
mod rounds;
mod score;
mod similar;
mod weather;

pub use confidence::{estimate, ConfidenceLabel, ConfidenceReport};
pub use insights::{preference_insights, preference_strength, PreferenceInsights};
pub use learner::learn;
pub use ranking::rank;
pub use rounds::{RoundConfig, RoundSelector, SelectionPhase};
pub use score::{
    blend, match_breakdown, match_score, BlendWeight, BlendWeightError, FeatureContribution,
    NEUTRAL_SCORE,
};
pub use similar::{find_similar, SimilarDestination};
pub use weather::{secondary_from_temperature, temperature_score};

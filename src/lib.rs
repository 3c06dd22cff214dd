//! Facade crate for the Wayfarer destination-matching engine.
//!
//! This crate re-exports the core domain types and matching algorithms, and
//! exposes the optional SQLite catalogue behind a feature flag.

#![forbid(unsafe_code)]

pub use wayfarer_core::{
    BudgetQuery, Catalog, CatalogError, Destination, Feature, FeatureRanges, FeatureValueError,
    PreferenceVector, ResolvedStyle, RoundError, RoundState, Scale, ScoredDestination,
    SecondaryScore, SecondaryScoreError, StyleProfile, StyleProfileError, StyleRegistry,
    TravelStyle,
};

#[cfg(feature = "catalog-sqlite")]
pub use wayfarer_core::{SqliteCatalog, SqliteCatalogError};

pub use wayfarer_match::{
    blend, estimate, find_similar, learn, match_breakdown, match_score, preference_insights,
    preference_strength, rank, secondary_from_temperature, temperature_score, BlendWeight,
    BlendWeightError, ConfidenceLabel, ConfidenceReport, FeatureContribution, PreferenceInsights,
    RoundConfig, RoundSelector, SelectionPhase, SimilarDestination, NEUTRAL_SCORE,
};

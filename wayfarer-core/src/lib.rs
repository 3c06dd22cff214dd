//! Core domain types for the Wayfarer destination-matching engine.
//!
//! These models provide basic validation to keep downstream components
//! honest: feature values are checked against their declared scales when a
//! destination is built, style profiles must carry signal, and round state
//! rejects picks that were never shown. Constructors return `Result` to
//! surface invalid input early.
//!
//! The crate holds no algorithmic code; scoring, selection, and ranking live
//! in `wayfarer-match`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod catalog;
mod destination;
mod feature;
mod preference;
mod ranges;
mod round;
mod style;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use catalog::{BudgetQuery, Catalog, CatalogError};
#[cfg(feature = "catalog-sqlite")]
pub use catalog::{SqliteCatalog, SqliteCatalogError};
pub use destination::{Destination, ScoredDestination, SecondaryScore, SecondaryScoreError};
pub use feature::{Feature, FeatureValueError, Scale};
pub use preference::PreferenceVector;
pub use ranges::FeatureRanges;
pub use round::{RoundError, RoundState};
pub use style::{ResolvedStyle, StyleProfile, StyleProfileError, StyleRegistry, TravelStyle};

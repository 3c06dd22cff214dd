//! Data access traits for destination catalogues.
//!
//! The `Catalog` trait defines a read-only interface for retrieving
//! [`Destination`] values, either wholesale or filtered to a budget. The
//! engine itself never touches storage; catalogues are the collaborator that
//! does.

use thiserror::Error;

use crate::{Destination, FeatureValueError};

#[cfg(feature = "catalog-sqlite")]
mod sqlite;

#[cfg(feature = "catalog-sqlite")]
pub use sqlite::{SqliteCatalog, SqliteCatalogError};

/// Budget constraints for a candidate query.
///
/// # Examples
/// ```
/// use wayfarer_core::BudgetQuery;
///
/// let query = BudgetQuery::new(3000.0, 7).with_travelers(2);
/// assert!(query.admits(3500.0));
/// assert!(!query.admits(3601.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetQuery {
    /// Total trip budget for the whole party.
    pub total_budget: f32,
    /// Trip length in days.
    pub trip_days: u32,
    /// Party size.
    pub travelers: u32,
}

impl BudgetQuery {
    /// Budget slack multiplier. Destinations slightly over budget are kept so
    /// results do not vanish right at the boundary.
    pub const SLACK: f32 = 1.2;

    /// Query for a single traveller.
    #[must_use]
    pub const fn new(total_budget: f32, trip_days: u32) -> Self {
        Self {
            total_budget,
            trip_days,
            travelers: 1,
        }
    }

    /// Set the party size while returning `self`.
    #[must_use]
    pub const fn with_travelers(mut self, travelers: u32) -> Self {
        self.travelers = travelers;
        self
    }

    /// Whether a trip cost fits the budget including slack.
    #[must_use]
    pub fn admits(&self, trip_cost: f32) -> bool {
        trip_cost <= self.total_budget * Self::SLACK
    }
}

/// Errors raised when reading a catalogue.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The underlying storage failed.
    #[error("failed to read catalogue: {message}")]
    Storage {
        /// Backend-specific description of the failure.
        message: String,
    },
    /// A stored destination failed feature validation at load time.
    #[error("destination {id} failed validation")]
    InvalidDestination {
        /// Identifier of the offending record.
        id: u64,
        /// The validation failure.
        #[source]
        source: FeatureValueError,
    },
}

/// Read-only access to a destination catalogue.
///
/// An empty catalogue is not an error: both operations simply return an
/// empty vector and downstream selection and ranking handle that case.
pub trait Catalog {
    /// Return every destination in the catalogue.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the backend cannot be read or a record
    /// fails validation.
    fn all(&self) -> Result<Vec<Destination>, CatalogError>;

    /// Return destinations affordable under `query`, cheapest first.
    ///
    /// The default implementation filters [`Catalog::all`] by
    /// [`Destination::trip_cost`] with the [`BudgetQuery::SLACK`] allowance
    /// and sorts ascending by cost.
    ///
    /// # Errors
    /// Propagates errors from [`Catalog::all`].
    fn candidates(&self, query: &BudgetQuery) -> Result<Vec<Destination>, CatalogError> {
        let mut matches: Vec<(f32, Destination)> = self
            .all()?
            .into_iter()
            .map(|dest| (dest.trip_cost(query.trip_days, query.travelers), dest))
            .filter(|(cost, _)| query.admits(*cost))
            .collect();
        matches.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        Ok(matches.into_iter().map(|(_, dest)| dest).collect())
    }
}

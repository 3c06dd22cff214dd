//! Test-only, in-memory `Catalog` implementation and destination builders
//! used by unit and behaviour tests.

use crate::{Catalog, CatalogError, Destination, Feature};

/// In-memory `Catalog` used in tests.
///
/// The catalogue clones its backing vector on every read and is intended
/// only for small datasets.
#[derive(Default, Debug, Clone)]
pub struct MemoryCatalog {
    destinations: Vec<Destination>,
}

impl MemoryCatalog {
    /// Create a catalogue from a collection of destinations.
    pub fn with_destinations<I>(destinations: I) -> Self
    where
        I: IntoIterator<Item = Destination>,
    {
        Self {
            destinations: destinations.into_iter().collect(),
        }
    }
}

impl Catalog for MemoryCatalog {
    fn all(&self) -> Result<Vec<Destination>, CatalogError> {
        Ok(self.destinations.clone())
    }
}

/// Build a destination with the given feature values.
///
/// # Panics
/// Panics when a value violates its feature's scale; fixtures are expected
/// to be valid.
#[must_use]
pub fn destination(id: u64, name: &str, features: &[(Feature, f32)]) -> Destination {
    let mut dest = Destination::new(id, name, "Testland");
    for &(feature, value) in features {
        dest.set_feature(feature, value).expect("fixture feature in scale");
    }
    dest
}

/// Build a destination carrying only a daily budget, for cost-centric tests.
///
/// # Panics
/// Panics when the budget is out of scale.
#[must_use]
pub fn budget_only(id: u64, daily_budget: f32) -> Destination {
    destination(
        id,
        &format!("budget-{id}"),
        &[(Feature::DailyBudget, daily_budget)],
    )
}

//! Learned preference vectors.
//!
//! A [`PreferenceVector`] holds the per-feature mean of the destinations a
//! user picked during the matching rounds. It is derived transiently by the
//! learner and is empty before the first choice.

use std::collections::BTreeMap;

use crate::Feature;

/// Per-feature learned preference values.
///
/// # Examples
/// ```
/// use wayfarer_core::{Feature, PreferenceVector};
///
/// let preference: PreferenceVector = [(Feature::Beach, 4.5)].into_iter().collect();
/// assert_eq!(preference.value(Feature::Beach), Some(4.5));
/// assert!(preference.value(Feature::Crowds).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreferenceVector {
    values: BTreeMap<Feature, f32>,
}

impl PreferenceVector {
    /// Construct an empty vector, the cold-start state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the learned value for a feature, if any choice rated it.
    #[must_use]
    pub fn value(&self, feature: Feature) -> Option<f32> {
        self.values.get(&feature).copied()
    }

    /// True before any choice has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of features with a learned value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over learned values in canonical feature order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f32)> + '_ {
        self.values.iter().map(|(&feature, &value)| (feature, value))
    }
}

impl FromIterator<(Feature, f32)> for PreferenceVector {
    fn from_iter<I: IntoIterator<Item = (Feature, f32)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

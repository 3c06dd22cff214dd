//! Per-feature value ranges used for normalisation.
//!
//! Ranges are computed over the current candidate pool, so normalisation is
//! always relative to what the user could actually be shown.
//!
//! Features absent from the whole pool fall back to [`FeatureRanges::DEFAULT_SPAN`],
//! the 1-5 qualitative scale. Note that this default also applies to cost
//! features such as daily budget: a pool where nobody carries a budget value
//! would normalise a learned budget preference against (1, 5). This matches
//! the behaviour the rest of the engine is calibrated for, so it is kept and
//! documented rather than special-cased.

use std::collections::BTreeMap;

use crate::{Destination, Feature};

/// Minimum and maximum observed value per feature across a pool.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureRanges {
    spans: BTreeMap<Feature, (f32, f32)>,
}

impl FeatureRanges {
    /// Span assumed for features no pool member carries.
    pub const DEFAULT_SPAN: (f32, f32) = (1.0, 5.0);

    /// Compute ranges over every feature present in the pool.
    ///
    /// An empty pool yields ranges that answer [`Self::DEFAULT_SPAN`] for
    /// every feature.
    ///
    /// # Examples
    /// ```
    /// use wayfarer_core::{Destination, Feature, FeatureRanges};
    ///
    /// # fn main() -> Result<(), wayfarer_core::FeatureValueError> {
    /// let pool = vec![
    ///     Destination::new(1, "A", "X").with_feature(Feature::Beach, 2.0)?,
    ///     Destination::new(2, "B", "X").with_feature(Feature::Beach, 5.0)?,
    /// ];
    /// let ranges = FeatureRanges::from_pool(&pool);
    /// assert_eq!(ranges.span(Feature::Beach), (2.0, 5.0));
    /// assert_eq!(ranges.span(Feature::Crowds), FeatureRanges::DEFAULT_SPAN);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn from_pool(pool: &[Destination]) -> Self {
        let mut spans = BTreeMap::new();
        for feature in Feature::ALL {
            let mut observed: Option<(f32, f32)> = None;
            for value in pool.iter().filter_map(|dest| dest.feature(feature)) {
                observed = Some(match observed {
                    None => (value, value),
                    Some((lo, hi)) => (lo.min(value), hi.max(value)),
                });
            }
            if let Some(span) = observed {
                spans.insert(feature, span);
            }
        }
        Self { spans }
    }

    /// Return the (min, max) span for a feature, defaulting when the pool
    /// never rated it.
    #[must_use]
    pub fn span(&self, feature: Feature) -> (f32, f32) {
        self.spans
            .get(&feature)
            .copied()
            .unwrap_or(Self::DEFAULT_SPAN)
    }

    /// Normalise a value into `0..=1` within the feature's span.
    ///
    /// Degenerate spans (every pool member agrees) normalise to 0.5 so a
    /// single-valued feature neither rewards nor penalises anyone.
    #[must_use]
    pub fn normalise(&self, feature: Feature, value: f32) -> f32 {
        let (lo, hi) = self.span(feature);
        if hi == lo {
            return 0.5;
        }
        (value - lo) / (hi - lo)
    }
}

impl FromIterator<(Feature, (f32, f32))> for FeatureRanges {
    fn from_iter<I: IntoIterator<Item = (Feature, (f32, f32))>>(iter: I) -> Self {
        Self {
            spans: iter.into_iter().collect(),
        }
    }
}

//! Destination records and their scored counterparts.
//!
//! A [`Destination`] carries a sparse set of validated feature values.
//! Absent features stay absent; they are never coerced to zero, so the
//! scorer can distinguish "unknown" from "rated poorly".

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{Feature, FeatureValueError};

/// An externally computed compatibility score attached to a destination
/// before ranking, typically derived from weather conditions.
///
/// The engine never fetches these itself; collaborators resolve them (or
/// leave them absent, which downstream code treats as [`SecondaryScore::NEUTRAL`]).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SecondaryScore {
    /// Compatibility score in `0.0..=100.0`.
    pub score: f32,
    /// Observed temperature in degrees Celsius, when known.
    pub temperature: Option<f32>,
    /// Observed precipitation in millimetres, when known.
    pub precipitation: Option<f32>,
}

/// Errors returned by [`SecondaryScore::new`].
#[derive(Debug, Error, PartialEq)]
pub enum SecondaryScoreError {
    /// The score was non-finite or outside `0..=100`.
    #[error("secondary score {value} must lie in 0..=100")]
    OutOfRange {
        /// Offending value.
        value: f32,
    },
}

impl SecondaryScore {
    /// Neutral score used whenever no secondary signal is available.
    pub const NEUTRAL: f32 = 50.0;

    /// The neutral score as a value, for providers with nothing to report.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            score: Self::NEUTRAL,
            temperature: None,
            precipitation: None,
        }
    }

    /// Validate and construct a [`SecondaryScore`].
    ///
    /// # Errors
    /// Returns [`SecondaryScoreError::OutOfRange`] for non-finite values or
    /// values outside `0..=100`.
    pub fn new(score: f32) -> Result<Self, SecondaryScoreError> {
        if !score.is_finite() || !(0.0..=100.0).contains(&score) {
            return Err(SecondaryScoreError::OutOfRange { value: score });
        }
        Ok(Self {
            score,
            temperature: None,
            precipitation: None,
        })
    }

    /// Attach the raw temperature reading behind the score.
    #[must_use]
    pub const fn with_temperature(mut self, celsius: f32) -> Self {
        self.temperature = Some(celsius);
        self
    }

    /// Attach the raw precipitation reading behind the score.
    #[must_use]
    pub const fn with_precipitation(mut self, millimetres: f32) -> Self {
        self.precipitation = Some(millimetres);
        self
    }
}

/// A catalogue entry the engine can recommend.
///
/// # Examples
/// ```
/// use wayfarer_core::{Destination, Feature};
///
/// # fn main() -> Result<(), wayfarer_core::FeatureValueError> {
/// let lisbon = Destination::new(1, "Lisbon", "Portugal")
///     .with_feature(Feature::Culture, 5.0)?
///     .with_feature(Feature::DailyBudget, 110.0)?;
/// assert_eq!(lisbon.feature(Feature::Culture), Some(5.0));
/// assert_eq!(lisbon.feature(Feature::Beach), None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Destination {
    /// Unique identifier within the catalogue.
    pub id: u64,
    /// Display name, usually the city.
    pub name: String,
    /// Country the destination belongs to.
    pub country: String,
    /// Sparse validated feature values.
    features: BTreeMap<Feature, f32>,
    /// Return flight price per traveller, when known.
    pub flight_price: Option<f32>,
    /// Externally attached compatibility score, when resolved.
    pub secondary: Option<SecondaryScore>,
}

impl Destination {
    /// Construct a destination with no feature values.
    pub fn new(id: u64, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            country: country.into(),
            features: BTreeMap::new(),
            flight_price: None,
            secondary: None,
        }
    }

    /// Insert or replace a feature value.
    ///
    /// # Errors
    /// Returns [`FeatureValueError`] when the value violates the feature's
    /// declared scale.
    pub fn set_feature(&mut self, feature: Feature, value: f32) -> Result<(), FeatureValueError> {
        feature.validate(value)?;
        self.features.insert(feature, value);
        Ok(())
    }

    /// Add a feature value while returning `self` for chaining.
    ///
    /// # Errors
    /// Returns [`FeatureValueError`] when the value violates the feature's
    /// declared scale.
    pub fn with_feature(mut self, feature: Feature, value: f32) -> Result<Self, FeatureValueError> {
        self.set_feature(feature, value)?;
        Ok(self)
    }

    /// Set the per-traveller flight price while returning `self`.
    #[must_use]
    pub const fn with_flight_price(mut self, price: f32) -> Self {
        self.flight_price = Some(price);
        self
    }

    /// Attach a resolved secondary score while returning `self`.
    #[must_use]
    pub const fn with_secondary(mut self, secondary: SecondaryScore) -> Self {
        self.secondary = Some(secondary);
        self
    }

    /// Return the value for a feature, if rated.
    #[must_use]
    pub fn feature(&self, feature: Feature) -> Option<f32> {
        self.features.get(&feature).copied()
    }

    /// Iterate over the rated features in canonical order.
    pub fn features(&self) -> impl Iterator<Item = (Feature, f32)> + '_ {
        self.features.iter().map(|(&feature, &value)| (feature, value))
    }

    /// Convenience accessor for the daily budget cost feature.
    #[must_use]
    pub fn daily_budget(&self) -> Option<f32> {
        self.feature(Feature::DailyBudget)
    }

    /// The resolved secondary score, or [`SecondaryScore::NEUTRAL`] when the
    /// provider never attached one.
    #[must_use]
    pub fn secondary_score_or_neutral(&self) -> f32 {
        self.secondary
            .map_or(SecondaryScore::NEUTRAL, |secondary| secondary.score)
    }

    /// Total trip cost for a party, mirroring the catalogue's budget filter:
    /// flights plus daily spend, per traveller.
    ///
    /// Unknown cost components count as zero here; this is a cost estimate,
    /// not a feature value, so the absence rule for scoring does not apply.
    #[must_use]
    pub fn trip_cost(&self, trip_days: u32, travelers: u32) -> f32 {
        let flights = self.flight_price.unwrap_or(0.0);
        let daily = self.daily_budget().unwrap_or(0.0);
        let days = trip_days as f32;
        let party = travelers as f32;
        flights * party + daily * days * party
    }
}

/// A destination annotated with the scores the ranking engine derived for it.
///
/// Scored values are transient: they are recomputed on every ranking call and
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredDestination {
    /// The underlying catalogue entry.
    pub destination: Destination,
    /// Weighted similarity to the learned preference, `0..=100`.
    pub match_score: f32,
    /// Secondary compatibility score used for blending, `0..=100`.
    pub secondary_score: f32,
    /// Final ordering score, `0..=100`.
    pub combined_score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn absent_features_stay_absent() {
        let dest = Destination::new(1, "Oslo", "Norway");
        assert_eq!(dest.feature(Feature::Beach), None);
        assert_eq!(dest.daily_budget(), None);
    }

    #[test]
    fn set_feature_rejects_out_of_scale() {
        let mut dest = Destination::new(1, "Oslo", "Norway");
        let err = dest.set_feature(Feature::Safety, 9.0).unwrap_err();
        assert_eq!(
            err,
            FeatureValueError::OutOfScale {
                feature: Feature::Safety,
                value: 9.0
            }
        );
    }

    #[rstest]
    #[case(None, 120.0, 7, 1, 840.0)]
    #[case(Some(300.0), 120.0, 7, 2, 2280.0)]
    fn trip_cost_covers_party(
        #[case] flight: Option<f32>,
        #[case] daily: f32,
        #[case] days: u32,
        #[case] travelers: u32,
        #[case] expected: f32,
    ) {
        let mut dest = Destination::new(1, "Porto", "Portugal")
            .with_feature(Feature::DailyBudget, daily)
            .expect("valid budget");
        dest.flight_price = flight;
        assert!((dest.trip_cost(days, travelers) - expected).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_secondary_defaults_to_neutral() {
        let dest = Destination::new(1, "Porto", "Portugal");
        assert!((dest.secondary_score_or_neutral() - SecondaryScore::NEUTRAL).abs() < f32::EPSILON);
    }

    #[test]
    fn secondary_rejects_out_of_range() {
        assert!(SecondaryScore::new(101.0).is_err());
        assert!(SecondaryScore::new(f32::NAN).is_err());
        assert!(SecondaryScore::new(0.0).is_ok());
    }
}

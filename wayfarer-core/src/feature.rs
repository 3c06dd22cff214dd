//! Destination features and their declared scales.
//!
//! The enum offers compile-time safety for feature lookups. Every feature
//! declares the [`Scale`] its values live on, so catalogue loaders can
//! validate data once instead of scoring code re-checking it on every call.
//!
//! # Examples
//! ```
//! use wayfarer_core::{Feature, Scale};
//!
//! assert_eq!(Feature::Beach.as_str(), "beach");
//! assert_eq!(Feature::DailyBudget.scale(), Scale::Currency);
//! ```

use thiserror::Error;

/// A destination attribute used by the matching engine.
///
/// The qualitative features are rated on a 1-5 scale; `DailyBudget` carries a
/// currency amount and is the only cost feature visible to the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Feature {
    /// Personal safety rating.
    Safety,
    /// How widely English is spoken.
    EnglishLevel,
    /// Typical tourist crowding.
    Crowds,
    /// Beach quality and access.
    Beach,
    /// Museums, heritage, and the arts.
    Culture,
    /// Natural landscapes and parks.
    Nature,
    /// Local cuisine.
    Food,
    /// Bars, clubs, and evening entertainment.
    Nightlife,
    /// Outdoor and adrenaline activities.
    Adventure,
    /// Suitability for couples.
    Romance,
    /// Suitability for children and families.
    Family,
    /// Average daily spend in the session currency.
    DailyBudget,
}

/// The value scale a [`Feature`] is rated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Qualitative rating from 1 (poor) to 5 (excellent).
    OneToFive,
    /// Positive currency amount, unbounded above.
    Currency,
}

/// Errors raised when validating a feature value at data-load time.
#[derive(Debug, Error, PartialEq)]
pub enum FeatureValueError {
    /// The value was NaN or infinite.
    #[error("{feature} value must be finite")]
    NotFinite {
        /// Feature being validated.
        feature: Feature,
    },
    /// The value fell outside the feature's declared scale.
    #[error("{feature} value {value} is outside its scale")]
    OutOfScale {
        /// Feature being validated.
        feature: Feature,
        /// Offending value.
        value: f32,
    },
}

impl Feature {
    /// Every feature the engine understands, in canonical order.
    pub const ALL: [Self; 12] = [
        Self::Safety,
        Self::EnglishLevel,
        Self::Crowds,
        Self::Beach,
        Self::Culture,
        Self::Nature,
        Self::Food,
        Self::Nightlife,
        Self::Adventure,
        Self::Romance,
        Self::Family,
        Self::DailyBudget,
    ];

    /// The fixed qualitative subset used for destination-to-destination
    /// similarity. Cost features are excluded deliberately.
    pub const QUALITATIVE: [Self; 11] = [
        Self::Safety,
        Self::EnglishLevel,
        Self::Crowds,
        Self::Beach,
        Self::Culture,
        Self::Nature,
        Self::Food,
        Self::Nightlife,
        Self::Adventure,
        Self::Romance,
        Self::Family,
    ];

    /// Return the scale this feature's values live on.
    #[must_use]
    pub const fn scale(self) -> Scale {
        match self {
            Self::DailyBudget => Scale::Currency,
            _ => Scale::OneToFive,
        }
    }

    /// Return the feature as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use wayfarer_core::Feature;
    ///
    /// assert_eq!(Feature::EnglishLevel.as_str(), "english_level");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safety => "safety",
            Self::EnglishLevel => "english_level",
            Self::Crowds => "crowds",
            Self::Beach => "beach",
            Self::Culture => "culture",
            Self::Nature => "nature",
            Self::Food => "food",
            Self::Nightlife => "nightlife",
            Self::Adventure => "adventure",
            Self::Romance => "romance",
            Self::Family => "family",
            Self::DailyBudget => "daily_budget",
        }
    }

    /// Validate a raw value against this feature's scale.
    ///
    /// # Errors
    /// Returns [`FeatureValueError`] when the value is non-finite or outside
    /// the declared scale.
    pub fn validate(self, value: f32) -> Result<(), FeatureValueError> {
        if !value.is_finite() {
            return Err(FeatureValueError::NotFinite { feature: self });
        }
        let in_scale = match self.scale() {
            Scale::OneToFive => (1.0..=5.0).contains(&value),
            Scale::Currency => value > 0.0,
        };
        if in_scale {
            Ok(())
        } else {
            Err(FeatureValueError::OutOfScale {
                feature: self,
                value,
            })
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "safety" => Ok(Self::Safety),
            "english_level" => Ok(Self::EnglishLevel),
            "crowds" => Ok(Self::Crowds),
            "beach" => Ok(Self::Beach),
            "culture" => Ok(Self::Culture),
            "nature" => Ok(Self::Nature),
            "food" => Ok(Self::Food),
            "nightlife" => Ok(Self::Nightlife),
            "adventure" => Ok(Self::Adventure),
            "romance" => Ok(Self::Romance),
            "family" => Ok(Self::Family),
            "daily_budget" => Ok(Self::DailyBudget),
            _ => Err(format!("unknown feature '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn display_matches_as_str() {
        for feature in Feature::ALL {
            assert_eq!(feature.to_string(), feature.as_str());
        }
    }

    #[test]
    fn round_trips_through_from_str() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_str(feature.as_str()), Ok(feature));
        }
    }

    #[test]
    fn parsing_rejects_unknown() {
        let err = Feature::from_str("latitude").unwrap_err();
        assert!(err.contains("unknown feature"));
    }

    #[test]
    fn qualitative_subset_excludes_cost() {
        assert!(!Feature::QUALITATIVE.contains(&Feature::DailyBudget));
    }

    #[rstest]
    #[case(Feature::Beach, 1.0, true)]
    #[case(Feature::Beach, 5.0, true)]
    #[case(Feature::Beach, 0.5, false)]
    #[case(Feature::Beach, 5.5, false)]
    #[case(Feature::DailyBudget, 120.0, true)]
    #[case(Feature::DailyBudget, 0.0, false)]
    #[case(Feature::DailyBudget, -10.0, false)]
    fn validates_against_scale(#[case] feature: Feature, #[case] value: f32, #[case] ok: bool) {
        assert_eq!(feature.validate(value).is_ok(), ok);
    }

    #[rstest]
    #[case(f32::NAN)]
    #[case(f32::INFINITY)]
    fn rejects_non_finite(#[case] value: f32) {
        assert_eq!(
            Feature::Safety.validate(value),
            Err(FeatureValueError::NotFinite {
                feature: Feature::Safety
            })
        );
    }
}

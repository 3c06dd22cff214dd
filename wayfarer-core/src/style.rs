//! Travel style presets: named feature-weight vectors.
//!
//! Styles are a static registry of tagged variants rather than anything
//! polymorphic; each variant materialises its weight table on demand. The
//! sign of a weight encodes direction: negative means "lower is better"
//! (for example crowds for the hidden-gems persona, or daily budget for the
//! backpacker).

use std::collections::BTreeMap;

use thiserror::Error;

use crate::Feature;

/// A validated feature-weight vector expressing a travel persona.
///
/// # Examples
/// ```
/// use wayfarer_core::{Feature, StyleProfile};
///
/// let profile = StyleProfile::default_weights();
/// assert_eq!(profile.weight(Feature::Safety), Some(2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StyleProfile {
    weights: BTreeMap<Feature, f32>,
}

/// Errors returned by [`StyleProfile::new`].
#[derive(Debug, Error, PartialEq)]
pub enum StyleProfileError {
    /// Every supplied weight was zero (or none were supplied).
    #[error("style profile must contain at least one non-zero weight")]
    NoSignal,
    /// A weight was NaN or infinite.
    #[error("style weight for {feature} must be finite")]
    NonFiniteWeight {
        /// Feature carrying the offending weight.
        feature: Feature,
    },
}

impl StyleProfile {
    /// Validate and construct a profile.
    ///
    /// # Errors
    /// Returns [`StyleProfileError`] when no weight is non-zero or a weight
    /// is non-finite.
    pub fn new(weights: BTreeMap<Feature, f32>) -> Result<Self, StyleProfileError> {
        if let Some((&feature, _)) = weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(StyleProfileError::NonFiniteWeight { feature });
        }
        if weights.values().all(|&w| w == 0.0) {
            return Err(StyleProfileError::NoSignal);
        }
        Ok(Self { weights })
    }

    /// Balanced default weights used when no style is selected or the
    /// requested style is unknown. Safety counts double; everything else is
    /// weighted evenly.
    #[must_use]
    pub fn default_weights() -> Self {
        Self::from_table(&[
            (Feature::Safety, 2.0),
            (Feature::EnglishLevel, 1.0),
            (Feature::Crowds, 1.0),
            (Feature::Beach, 1.0),
            (Feature::Culture, 1.0),
            (Feature::Nature, 1.0),
            (Feature::Food, 1.0),
            (Feature::Nightlife, 1.0),
            (Feature::Adventure, 1.0),
            (Feature::Romance, 1.0),
            (Feature::Family, 1.0),
        ])
    }

    /// Return the weight for a feature, if the profile mentions it.
    #[must_use]
    pub fn weight(&self, feature: Feature) -> Option<f32> {
        self.weights.get(&feature).copied()
    }

    /// Iterate over weights in canonical feature order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f32)> + '_ {
        self.weights.iter().map(|(&feature, &weight)| (feature, weight))
    }

    /// Build from a static table; tables are trusted to carry signal.
    fn from_table(table: &[(Feature, f32)]) -> Self {
        Self {
            weights: table.iter().copied().collect(),
        }
    }
}

/// The named travel personas shipped with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TravelStyle {
    /// Sun, sand, and relaxation.
    BeachRelaxation,
    /// Museums, architecture, and heritage.
    CultureHistory,
    /// Hiking, wildlife, and outdoor activities.
    AdventureNature,
    /// Local cuisine and gastronomic experiences.
    Foodie,
    /// Clubs, bars, and vibrant nightlife.
    PartyNightlife,
    /// Couples and honeymoons.
    RomanticGetaway,
    /// Safe and fun for the whole family.
    FamilyVacation,
    /// Maximum experience, minimum cost.
    BudgetBackpacker,
    /// Off the beaten path.
    HiddenGems,
    /// A bit of everything.
    Balanced,
}

impl TravelStyle {
    /// Every shipped style, in presentation order.
    pub const ALL: [Self; 10] = [
        Self::BeachRelaxation,
        Self::CultureHistory,
        Self::AdventureNature,
        Self::Foodie,
        Self::PartyNightlife,
        Self::RomanticGetaway,
        Self::FamilyVacation,
        Self::BudgetBackpacker,
        Self::HiddenGems,
        Self::Balanced,
    ];

    /// Stable lookup key for the style.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::BeachRelaxation => "beach_relaxation",
            Self::CultureHistory => "culture_history",
            Self::AdventureNature => "adventure_nature",
            Self::Foodie => "foodie",
            Self::PartyNightlife => "party_nightlife",
            Self::RomanticGetaway => "romantic_getaway",
            Self::FamilyVacation => "family_vacation",
            Self::BudgetBackpacker => "budget_backpacker",
            Self::HiddenGems => "hidden_gems",
            Self::Balanced => "balanced",
        }
    }

    /// Human-readable name for presentation.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::BeachRelaxation => "Beach & Relaxation",
            Self::CultureHistory => "Culture & History",
            Self::AdventureNature => "Adventure & Nature",
            Self::Foodie => "Food & Culinary",
            Self::PartyNightlife => "Party & Nightlife",
            Self::RomanticGetaway => "Romantic Getaway",
            Self::FamilyVacation => "Family Vacation",
            Self::BudgetBackpacker => "Budget Travel",
            Self::HiddenGems => "Hidden Gems",
            Self::Balanced => "Balanced",
        }
    }

    /// One-line description for presentation.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::BeachRelaxation => "Sun, sand, and relaxation",
            Self::CultureHistory => "Museums, architecture, and heritage",
            Self::AdventureNature => "Hiking, wildlife, and outdoor activities",
            Self::Foodie => "Local cuisine and gastronomic experiences",
            Self::PartyNightlife => "Clubs, bars, and vibrant nightlife",
            Self::RomanticGetaway => "Perfect for couples and honeymoons",
            Self::FamilyVacation => "Safe and fun for the whole family",
            Self::BudgetBackpacker => "Maximum experience, minimum cost",
            Self::HiddenGems => "Off the beaten path destinations",
            Self::Balanced => "A bit of everything",
        }
    }

    /// Materialise the weight vector for this style.
    #[must_use]
    pub fn profile(self) -> StyleProfile {
        StyleProfile::from_table(self.weight_table())
    }

    const fn weight_table(self) -> &'static [(Feature, f32)] {
        match self {
            Self::BeachRelaxation => &[
                (Feature::Beach, 3.0),
                (Feature::Safety, 2.0),
                (Feature::Crowds, -1.5),
                (Feature::Nature, 1.5),
                (Feature::Romance, 1.0),
                (Feature::Food, 1.0),
                (Feature::Nightlife, 0.5),
                (Feature::Culture, 0.5),
                (Feature::Adventure, 0.5),
                (Feature::EnglishLevel, 1.0),
                (Feature::Family, 1.0),
            ],
            Self::CultureHistory => &[
                (Feature::Culture, 3.0),
                (Feature::Food, 2.0),
                (Feature::Safety, 1.5),
                (Feature::EnglishLevel, 1.5),
                (Feature::Nature, 1.0),
                (Feature::Romance, 1.0),
                (Feature::Crowds, -0.5),
                (Feature::Beach, 0.5),
                (Feature::Nightlife, 0.5),
                (Feature::Adventure, 0.5),
                (Feature::Family, 1.0),
            ],
            Self::AdventureNature => &[
                (Feature::Adventure, 3.0),
                (Feature::Nature, 3.0),
                (Feature::Crowds, -2.0),
                (Feature::Safety, 2.0),
                (Feature::Culture, 0.5),
                (Feature::Beach, 0.5),
                (Feature::Food, 1.0),
                (Feature::EnglishLevel, 1.0),
                (Feature::Nightlife, 0.0),
                (Feature::Romance, 1.0),
                (Feature::Family, 1.0),
            ],
            Self::Foodie => &[
                (Feature::Food, 3.0),
                (Feature::Culture, 2.0),
                (Feature::Safety, 1.5),
                (Feature::EnglishLevel, 1.0),
                (Feature::Nightlife, 1.0),
                (Feature::Crowds, -0.5),
                (Feature::Beach, 0.5),
                (Feature::Nature, 1.0),
                (Feature::Adventure, 0.5),
                (Feature::Romance, 1.5),
                (Feature::Family, 1.0),
            ],
            Self::PartyNightlife => &[
                (Feature::Nightlife, 3.0),
                (Feature::Beach, 1.5),
                (Feature::Safety, 1.5),
                (Feature::EnglishLevel, 2.0),
                (Feature::Food, 1.5),
                (Feature::Crowds, 0.5),
                (Feature::Culture, 0.5),
                (Feature::Nature, 0.5),
                (Feature::Adventure, 1.0),
                (Feature::Romance, 1.0),
                (Feature::Family, -1.0),
            ],
            Self::RomanticGetaway => &[
                (Feature::Romance, 3.0),
                (Feature::Safety, 2.5),
                (Feature::Food, 2.0),
                (Feature::Beach, 2.0),
                (Feature::Crowds, -2.0),
                (Feature::Nature, 2.0),
                (Feature::Culture, 1.5),
                (Feature::Nightlife, 1.0),
                (Feature::EnglishLevel, 1.0),
                (Feature::Adventure, 1.0),
                (Feature::Family, -1.0),
            ],
            Self::FamilyVacation => &[
                (Feature::Family, 3.0),
                (Feature::Safety, 3.0),
                (Feature::EnglishLevel, 2.0),
                (Feature::Beach, 1.5),
                (Feature::Nature, 1.5),
                (Feature::Culture, 1.0),
                (Feature::Food, 1.0),
                (Feature::Adventure, 1.0),
                (Feature::Nightlife, -1.5),
                (Feature::Crowds, -0.5),
                (Feature::Romance, 0.0),
            ],
            Self::BudgetBackpacker => &[
                (Feature::DailyBudget, -3.0),
                (Feature::Safety, 2.0),
                (Feature::EnglishLevel, 1.5),
                (Feature::Culture, 1.5),
                (Feature::Food, 1.5),
                (Feature::Adventure, 1.5),
                (Feature::Nature, 1.0),
                (Feature::Crowds, -0.5),
                (Feature::Beach, 1.0),
                (Feature::Nightlife, 1.0),
                (Feature::Romance, 0.5),
                (Feature::Family, 0.5),
            ],
            Self::HiddenGems => &[
                (Feature::Crowds, -3.0),
                (Feature::Nature, 2.0),
                (Feature::Culture, 1.5),
                (Feature::Adventure, 1.5),
                (Feature::Safety, 1.5),
                (Feature::Food, 1.0),
                (Feature::EnglishLevel, 0.5),
                (Feature::Beach, 1.0),
                (Feature::Nightlife, 0.0),
                (Feature::Romance, 1.5),
                (Feature::Family, 1.0),
            ],
            Self::Balanced => &[
                (Feature::Safety, 2.0),
                (Feature::Culture, 1.5),
                (Feature::Nature, 1.5),
                (Feature::Food, 1.5),
                (Feature::Beach, 1.0),
                (Feature::EnglishLevel, 1.0),
                (Feature::Adventure, 1.0),
                (Feature::Nightlife, 0.5),
                (Feature::Romance, 1.0),
                (Feature::Family, 1.0),
                (Feature::Crowds, -0.5),
            ],
        }
    }
}

impl std::fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for TravelStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.key() == key)
            .ok_or_else(|| format!("unknown travel style '{s}'"))
    }
}

/// The outcome of resolving a style name against the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    /// The matched style, when the name was recognised.
    pub style: Option<TravelStyle>,
    /// Weight vector to score with.
    pub profile: StyleProfile,
    /// True when the name was unknown and the default weights were used.
    pub fell_back: bool,
}

/// Static lookup over the shipped [`TravelStyle`] presets.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleRegistry;

impl StyleRegistry {
    /// Resolve a style name, falling back to [`StyleProfile::default_weights`]
    /// for unknown names. Unknown names are not an error; the `fell_back`
    /// flag records that the fallback happened.
    ///
    /// # Examples
    /// ```
    /// use wayfarer_core::StyleRegistry;
    ///
    /// let resolved = StyleRegistry::resolve("foodie");
    /// assert!(!resolved.fell_back);
    ///
    /// let fallback = StyleRegistry::resolve("time_traveller");
    /// assert!(fallback.fell_back);
    /// ```
    #[must_use]
    pub fn resolve(name: &str) -> ResolvedStyle {
        name.parse::<TravelStyle>().map_or_else(
            |_| ResolvedStyle {
                style: None,
                profile: StyleProfile::default_weights(),
                fell_back: true,
            },
            |style| ResolvedStyle {
                style: Some(style),
                profile: style.profile(),
                fell_back: false,
            },
        )
    }
}

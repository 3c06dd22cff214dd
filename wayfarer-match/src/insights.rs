//! Human-readable summaries of what the engine has learned.

use std::collections::BTreeMap;

use wayfarer_core::{Destination, Feature, PreferenceVector, Scale};

use crate::learner::learn;

/// What the engine has inferred from a user's picks so far.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceInsights {
    /// Number of picks the insights are based on.
    pub selections: usize,
    /// The learned preference vector.
    pub preference: PreferenceVector,
    /// Plain-language observations about the picks.
    pub patterns: Vec<String>,
}

/// Summarise the preference learned from `chosen` in plain language.
///
/// Patterns only fire on strong signals, so early sessions typically report
/// none. An empty slice produces zero selections and no patterns.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "pattern thresholds compare learned averages"
)]
pub fn preference_insights(chosen: &[Destination]) -> PreferenceInsights {
    let preference = learn(chosen);
    let mut patterns = Vec::new();

    let mut check = |feature: Feature, high: bool, threshold: f32, message: &str| {
        let Some(value) = preference.value(feature) else {
            return;
        };
        let fires = if high {
            value >= threshold
        } else {
            value <= threshold
        };
        if fires {
            patterns.push(message.to_owned());
        }
    };

    check(Feature::Beach, true, 4.0, "You gravitate towards coastal destinations");
    check(Feature::Crowds, false, 2.0, "You prefer quieter, less crowded places");
    check(Feature::Culture, true, 4.0, "Culture and history feature heavily in your picks");
    check(Feature::Nature, true, 4.0, "You are drawn to nature and the outdoors");
    check(Feature::Food, true, 4.0, "Food scenes matter to you");
    check(Feature::Nightlife, true, 4.0, "You favour destinations with lively nightlife");
    check(Feature::Adventure, true, 4.0, "You look for adventurous destinations");
    check(Feature::Safety, true, 4.5, "Safety is a priority in your choices");

    PreferenceInsights {
        selections: chosen.len(),
        preference,
        patterns,
    }
}

/// How decisive each learned value is, per feature, in `0..=1`.
///
/// Strength measures distance from the midpoint of the one-to-five scale:
/// a learned 3.0 says nothing (0.0) while a 1.0 or 5.0 is maximally
/// decisive (1.0). Currency-scaled features carry no midpoint and are
/// omitted.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "strength is a linear rescaling of the learned value"
)]
pub fn preference_strength(preference: &PreferenceVector) -> BTreeMap<Feature, f32> {
    preference
        .iter()
        .filter(|(feature, _)| feature.scale() == Scale::OneToFive)
        .map(|(feature, value)| (feature, ((value - 3.0).abs() / 2.0).clamp(0.0, 1.0)))
        .collect()
}

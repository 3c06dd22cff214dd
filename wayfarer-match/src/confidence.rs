//! Confidence estimation over a finished ranking.
//!
//! Confidence answers "how sure is the engine about its number one?". It is
//! driven by the gap between the top two combined scores and by the absolute
//! level of the winner, not by statistical rigour; the bands were tuned by
//! eye against real sessions.

use wayfarer_core::ScoredDestination;

/// Human-readable confidence band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLabel {
    /// Clear winner with a strong absolute score.
    VeryHigh,
    /// Clear winner.
    High,
    /// Comfortable lead.
    Good,
    /// Narrow lead.
    Medium,
    /// Effectively a coin toss.
    Low,
    /// Only one candidate survived; nothing to compare against.
    OnlyOption,
    /// The ranking was empty.
    NoResults,
}

impl ConfidenceLabel {
    /// Display text for the band.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Good => "Good",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::OnlyOption => "Only option",
            Self::NoResults => "No results",
        }
    }
}

/// How confident the engine is in the top recommendation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceReport {
    /// Confidence percentage in `0..=100`.
    pub confidence: f32,
    /// Band the confidence falls into.
    pub label: ConfidenceLabel,
    /// Combined-score lead of the winner over the runner-up.
    pub gap_to_second: f32,
    /// Population standard deviation of the top five combined scores.
    pub top5_spread: f32,
}

/// Estimate confidence in the top entry of a ranking.
///
/// The ranking must already be sorted highest combined score first, as
/// produced by [`crate::rank`]. A winner scoring below 50 caps confidence at
/// 50 regardless of its lead; a big gap over weak candidates is not a strong
/// recommendation.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "gap and spread are small-sample descriptive statistics"
)]
pub fn estimate(ranked: &[ScoredDestination]) -> ConfidenceReport {
    let Some(top) = ranked.first() else {
        return ConfidenceReport {
            confidence: 0.0,
            label: ConfidenceLabel::NoResults,
            gap_to_second: 0.0,
            top5_spread: 0.0,
        };
    };
    let Some(second) = ranked.get(1) else {
        return ConfidenceReport {
            confidence: 100.0,
            label: ConfidenceLabel::OnlyOption,
            gap_to_second: 0.0,
            top5_spread: 0.0,
        };
    };

    let top_score = top.combined_score;
    let gap = top_score - second.combined_score;
    let spread = population_std_dev(ranked.iter().take(5).map(|s| s.combined_score));

    let (mut confidence, label): (f32, _) = if gap >= 10.0 && top_score >= 75.0 {
        (95.0, ConfidenceLabel::VeryHigh)
    } else if gap >= 7.0 && top_score >= 70.0 {
        (85.0, ConfidenceLabel::High)
    } else if gap >= 4.0 && top_score >= 60.0 {
        (70.0, ConfidenceLabel::Good)
    } else if gap >= 2.0 {
        (55.0, ConfidenceLabel::Medium)
    } else {
        (40.0, ConfidenceLabel::Low)
    };
    if top_score < 50.0 {
        confidence = confidence.min(50.0);
    }

    ConfidenceReport {
        confidence,
        label,
        gap_to_second: gap,
        top5_spread: spread,
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "textbook variance over at most five values"
)]
fn population_std_dev(values: impl Iterator<Item = f32> + Clone) -> f32 {
    let count = values.clone().count();
    if count == 0 {
        return 0.0;
    }
    let n = count as f32;
    let mean = values.clone().sum::<f32>() / n;
    let variance = values.map(|v| (v - mean) * (v - mean)).sum::<f32>() / n;
    variance.sqrt()
}

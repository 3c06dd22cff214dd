//! Per-session round state threaded through the matching loop.
//!
//! The state is an explicit value owned by the caller: the engine only reads
//! it and returns new values. There is no hidden session object, so two
//! sessions can never bleed into each other.

use thiserror::Error;

use crate::Destination;

/// Errors returned by [`RoundState::record_choice`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundError {
    /// The confirmed pick was not part of the shown subset. This is a
    /// programmer error in the presentation layer; silently accepting it
    /// would corrupt preference learning.
    #[error("destination {id} was not among the shown candidates")]
    ChoiceNotShown {
        /// Identifier the caller claimed was picked.
        id: u64,
    },
}

/// Progress of one matching session.
///
/// # Examples
/// ```
/// use wayfarer_core::{Destination, RoundState};
///
/// let shown = vec![Destination::new(1, "A", "X"), Destination::new(2, "B", "X")];
/// let state = RoundState::new();
/// let state = state.record_choice(2, &shown)?;
/// assert_eq!(state.round(), 1);
/// assert_eq!(state.chosen().len(), 1);
/// assert!(state.was_shown(1));
/// # Ok::<(), wayfarer_core::RoundError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundState {
    chosen: Vec<Destination>,
    shown_ids: Vec<u64>,
    round: u32,
}

impl RoundState {
    /// Fresh state at session start.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Destinations the user confirmed, in pick order.
    #[must_use]
    pub fn chosen(&self) -> &[Destination] {
        &self.chosen
    }

    /// Every id that has been presented so far, in presentation order,
    /// deduplicated.
    #[must_use]
    pub fn shown_ids(&self) -> &[u64] {
        &self.shown_ids
    }

    /// Zero-based index of the upcoming round.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Whether the destination has already been presented.
    #[must_use]
    pub fn was_shown(&self, id: u64) -> bool {
        self.shown_ids.contains(&id)
    }

    /// Confirm a pick for the current round, returning the advanced state.
    ///
    /// Every shown id is retired from future rounds, not only the pick;
    /// showing a rejected destination again would teach the learner nothing.
    ///
    /// # Errors
    /// Returns [`RoundError::ChoiceNotShown`] when `chosen_id` does not
    /// appear in `shown`.
    pub fn record_choice(
        &self,
        chosen_id: u64,
        shown: &[Destination],
    ) -> Result<Self, RoundError> {
        let pick = shown
            .iter()
            .find(|dest| dest.id == chosen_id)
            .ok_or(RoundError::ChoiceNotShown { id: chosen_id })?;

        let mut next = self.clone();
        next.chosen.push(pick.clone());
        for dest in shown {
            if !next.shown_ids.contains(&dest.id) {
                next.shown_ids.push(dest.id);
            }
        }
        next.round += 1;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown() -> Vec<Destination> {
        vec![
            Destination::new(1, "A", "X"),
            Destination::new(2, "B", "X"),
            Destination::new(3, "C", "X"),
        ]
    }

    #[test]
    fn records_pick_and_retires_all_shown() {
        let state = RoundState::new().record_choice(2, &shown()).expect("valid pick");
        assert_eq!(state.round(), 1);
        assert_eq!(state.chosen().len(), 1);
        assert_eq!(state.chosen().first().map(|d| d.id), Some(2));
        assert_eq!(state.shown_ids(), &[1, 2, 3]);
    }

    #[test]
    fn rejects_pick_that_was_not_shown() {
        let err = RoundState::new().record_choice(9, &shown()).unwrap_err();
        assert_eq!(err, RoundError::ChoiceNotShown { id: 9 });
    }

    #[test]
    fn shown_ids_stay_deduplicated() {
        let first = RoundState::new().record_choice(1, &shown()).expect("valid pick");
        // A buggy caller re-presenting an id must not duplicate it.
        let second = first.record_choice(2, &shown()).expect("valid pick");
        assert_eq!(second.shown_ids(), &[1, 2, 3]);
    }

    #[test]
    fn original_state_is_untouched() {
        let state = RoundState::new();
        let _ = state.record_choice(1, &shown()).expect("valid pick");
        assert_eq!(state.round(), 0);
        assert!(state.chosen().is_empty());
    }
}

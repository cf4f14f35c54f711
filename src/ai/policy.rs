//! Opponent policies for the non-human side.
//!
//! A policy picks at most one slot per phase. `None` is a valid choice: no
//! attack passes the turn, no defense accepts full damage.

use crate::cards::{CardTemplate, CardType};
use crate::hand::Hand;
use crate::rules::{is_usable_in_attack_phase, is_usable_in_defense_phase};

// =============================================================================
// Opponent Policy
// =============================================================================

/// Card choice for a policy-controlled side.
pub trait OpponentPolicy: Send + Sync {
    /// Choose the attack (or immediate action) slot.
    ///
    /// Returns `None` to pass the turn.
    fn select_attack(&self, hand: &Hand) -> Option<usize>;

    /// Choose the defense slot.
    ///
    /// Returns `None` to accept full damage.
    fn select_defense(&self, hand: &Hand) -> Option<usize>;
}

/// Deterministic first-fit policy.
///
/// Prefers a dedicated card for the phase, else the first usable one, in
/// slot order. A pure function of hand contents, so outcomes against it are
/// reproducible for a fixed hand and roll stream.
#[derive(Clone, Debug, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    fn first_fit(
        hand: &Hand,
        usable: fn(&CardTemplate) -> bool,
        preferred: fn(&CardTemplate) -> bool,
    ) -> Option<usize> {
        hand.templates()
            .find(|(_, card)| usable(card) && preferred(card))
            .or_else(|| hand.templates().find(|(_, card)| usable(card)))
            .map(|(slot, _)| slot)
    }
}

impl OpponentPolicy for HeuristicPolicy {
    fn select_attack(&self, hand: &Hand) -> Option<usize> {
        Self::first_fit(hand, is_usable_in_attack_phase, |card| {
            card.roles.primary_attack || card.card_type == CardType::Attack
        })
    }

    fn select_defense(&self, hand: &Hand) -> Option<usize> {
        Self::first_fit(hand, is_usable_in_defense_phase, |card| {
            card.roles.primary_defense || card.card_type == CardType::Defense
        })
    }
}

/// Policy that never plays a card.
#[derive(Clone, Debug, Default)]
pub struct PassivePolicy;

impl OpponentPolicy for PassivePolicy {
    fn select_attack(&self, _hand: &Hand) -> Option<usize> {
        None
    }

    fn select_defense(&self, _hand: &Hand) -> Option<usize> {
        None
    }
}

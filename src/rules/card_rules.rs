//! Card rule predicates.
//!
//! Pure functions of a template: which phases a card may be played in, and
//! whether it resolves immediately instead of going through defense.
//!
//! | Predicate | True when |
//! |-----------|-----------|
//! | `is_usable_in_attack_phase` | override, attack/counter/recovery/special role, or any non-Defense type |
//! | `is_usable_in_defense_phase` | override, primary-defense/counter role, or Defense type |
//! | `is_immediate_action` | Recovery type or recovery role |

use crate::cards::{CardTemplate, CardType};

/// Can this card be selected while attacking?
#[must_use]
pub fn is_usable_in_attack_phase(card: &CardTemplate) -> bool {
    if card.usable_in_attack {
        return true;
    }
    let roles = &card.roles;
    if roles.primary_attack || roles.additional_attack || roles.counter_attack {
        return true;
    }
    if roles.recovery || roles.special_effect {
        return true;
    }
    match card.card_type {
        CardType::Defense => false,
        CardType::Attack | CardType::Magic | CardType::Recovery | CardType::Special => true,
    }
}

/// Can this card be selected while defending?
#[must_use]
pub fn is_usable_in_defense_phase(card: &CardTemplate) -> bool {
    card.usable_in_defense
        || card.roles.primary_defense
        || card.roles.counter_attack
        || card.card_type == CardType::Defense
}

/// Does this card resolve at once, skipping the defense phase?
#[must_use]
pub fn is_immediate_action(card: &CardTemplate) -> bool {
    card.card_type == CardType::Recovery || card.roles.recovery
}

/// Does adding `new` to a selection holding `existing` clear that selection?
///
/// - An immediate card replaces any existing selection.
/// - Any card replaces an existing immediate card.
/// - A second primary attack replaces the existing combo.
///
/// Additional and support cards stack onto a primary without conflict.
#[must_use]
pub fn has_conflict(existing: &[&CardTemplate], new: &CardTemplate) -> bool {
    if existing.is_empty() {
        return false;
    }
    if is_immediate_action(new) {
        return true;
    }
    if existing.iter().any(|card| is_immediate_action(card)) {
        return true;
    }
    new.roles.primary_attack && existing.iter().any(|card| card.roles.primary_attack)
}

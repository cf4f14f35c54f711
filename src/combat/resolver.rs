//! Combat resolution.
//!
//! ## Exchange
//!
//! 1. `total_attack` sums the attack cards, `total_defense` the defense cards
//! 2. one roll in `[0, 100)`; the lead attack card's hit rate gates the whole
//!    combo, and the exchange misses iff `roll >= hit_rate`
//! 3. on a hit, `total_attack - total_defense` (floored at 0) goes through
//!    the defender's `take_damage`, then the lead card's status-effect chance
//!    is rolled separately
//!
//! Resolution never touches hands. Consuming the defense cards is the
//! caller's job once resolution has completed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::CardTemplate;
use crate::combatant::{CombatantState, PoolKind, StatusEffect, StatusEffectKind};
use crate::core::RollSource;

/// Result of one attack/defense exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    Miss,
    Hit {
        /// Attack minus defense, floored at 0.
        damage: u32,
        /// HP the defender actually lost after effects and clamping.
        hp_lost: u32,
        /// Effect newly attached to the defender, if any.
        status_applied: Option<StatusEffectKind>,
    },
}

impl CombatOutcome {
    #[must_use]
    pub fn is_hit(&self) -> bool {
        matches!(self, CombatOutcome::Hit { .. })
    }
}

/// Amounts restored by an immediate action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restored {
    pub hp: u32,
    pub mp: u32,
    pub gp: u32,
}

impl Restored {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.hp + self.mp + self.gp
    }
}

/// Sum of attack power.
#[must_use]
pub fn total_attack(cards: &[&CardTemplate]) -> u32 {
    cards.iter().map(|c| c.attack_power).fold(0, u32::saturating_add)
}

/// Sum of defense power.
#[must_use]
pub fn total_defense(cards: &[&CardTemplate]) -> u32 {
    cards.iter().map(|c| c.defense_power).fold(0, u32::saturating_add)
}

/// Settle an exchange between a committed attack and a defense set.
///
/// An empty attack set is a miss and draws no roll.
pub fn resolve_combat(
    attack: &[&CardTemplate],
    defense: &[&CardTemplate],
    attacker: &CombatantState,
    defender: &mut CombatantState,
    rolls: &mut dyn RollSource,
) -> CombatOutcome {
    let Some(lead) = attack.first() else {
        return CombatOutcome::Miss;
    };

    let attack_power = total_attack(attack);
    let defense_power = total_defense(defense);

    let roll = rolls.roll_percent();
    let hit_rate = lead.effective_hit_rate();
    if roll >= hit_rate {
        debug!(
            attacker = attacker.display_name(),
            defender = defender.display_name(),
            roll,
            hit_rate,
            "attack missed"
        );
        return CombatOutcome::Miss;
    }

    let damage = attack_power.saturating_sub(defense_power);
    let hp_lost = defender.take_damage(damage);

    let status_applied = match lead.status_effect {
        Some(kind) if lead.status_effect_chance > 0 => {
            let status_roll = rolls.roll_percent();
            let landed = status_roll < lead.status_effect_chance.min(100)
                && defender.add_status_effect(StatusEffect::permanent(kind));
            landed.then_some(kind)
        }
        _ => None,
    };

    debug!(
        attacker = attacker.display_name(),
        defender = defender.display_name(),
        roll,
        attack_power,
        defense_power,
        damage,
        hp_lost,
        "attack hit"
    );

    CombatOutcome::Hit {
        damage,
        hp_lost,
        status_applied,
    }
}

/// Apply an immediate (recovery) card to its user.
///
/// Each targeted pool gains `recovery_amount`, clamped to its max.
pub fn resolve_immediate_effect(card: &CardTemplate, user: &mut CombatantState) -> Restored {
    let amount = card.recovery_amount;
    let mut restored = Restored::default();
    if card.heals.hp {
        restored.hp = user.restore(PoolKind::Hp, amount);
    }
    if card.heals.mp {
        restored.mp = user.restore(PoolKind::Mp, amount);
    }
    if card.heals.gp {
        restored.gp = user.restore(PoolKind::Gp, amount);
    }
    debug!(
        user = user.display_name(),
        card = %card.name,
        hp = restored.hp,
        mp = restored.mp,
        gp = restored.gp,
        "immediate effect resolved"
    );
    restored
}

//! Per-side combatant state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::pools::{Pool, PoolKind, Pools};
use super::status::{StatusEffect, StatusEffectKind};
use crate::core::CombatantSetup;

/// HP/MP/GP pools, active status effects, and display identity for one side.
///
/// ## Example
///
/// ```
/// use battle_ccg::combatant::{CombatantState, StatusEffect, StatusEffectKind};
/// use battle_ccg::core::CombatantSetup;
///
/// let mut hero = CombatantState::from_setup(&CombatantSetup::new("Hero"));
/// hero.add_status_effect(StatusEffect::permanent(StatusEffectKind::Weaken));
///
/// assert_eq!(hero.take_damage(10), 5);
/// assert_eq!(hero.hp(), 45);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantState {
    display_name: String,
    affinity: Option<String>,
    pools: Pools,
    effects: Vec<StatusEffect>,
}

impl CombatantState {
    #[must_use]
    pub fn new(display_name: impl Into<String>, pools: Pools) -> Self {
        Self {
            display_name: display_name.into(),
            affinity: None,
            pools,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_setup(setup: &CombatantSetup) -> Self {
        let pools = Pools::new(
            Pool::new(setup.hp, setup.max_hp),
            Pool::new(setup.mp, setup.max_mp),
            Pool::new(setup.gp, setup.max_gp),
        );
        Self {
            display_name: setup.display_name.clone(),
            affinity: setup.affinity.clone(),
            pools,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Opaque affinity reference (e.g. a summon).
    #[must_use]
    pub fn affinity(&self) -> Option<&str> {
        self.affinity.as_deref()
    }

    #[must_use]
    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    #[must_use]
    pub fn pool(&self, kind: PoolKind) -> &Pool {
        self.pools.get(kind)
    }

    #[must_use]
    pub fn hp(&self) -> u32 {
        self.pools.hp.current()
    }

    #[must_use]
    pub fn mp(&self) -> u32 {
        self.pools.mp.current()
    }

    #[must_use]
    pub fn gp(&self) -> u32 {
        self.pools.gp.current()
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.pools.hp.is_empty()
    }

    /// Apply damage after every active effect has modified it.
    ///
    /// Effects fold in list order. HP never drops below 0. Returns the HP
    /// actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let modified = self
            .effects
            .iter()
            .fold(amount, |dmg, effect| effect.modify_damage(dmg));
        self.pools.hp.sub(modified)
    }

    /// Restore up to `amount` to one pool. Returns the amount restored.
    pub fn restore(&mut self, kind: PoolKind, amount: u32) -> u32 {
        self.pools.get_mut(kind).add(amount)
    }

    /// Remove up to `amount` from one pool. Returns the amount removed.
    pub fn drain(&mut self, kind: PoolKind, amount: u32) -> u32 {
        self.pools.get_mut(kind).sub(amount)
    }

    /// Attach an effect unless one of the same kind is already active.
    ///
    /// First application wins: no refresh, no stacking. Returns whether the
    /// effect was attached.
    pub fn add_status_effect(&mut self, effect: StatusEffect) -> bool {
        if self.has_effect(effect.kind()) {
            return false;
        }
        debug!(owner = %self.display_name, effect = %effect.kind(), "status effect applied");
        self.effects.push(effect);
        true
    }

    #[must_use]
    pub fn has_effect(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind() == kind)
    }

    #[must_use]
    pub fn effects(&self) -> &[StatusEffect] {
        &self.effects
    }

    /// Tick every effect, then remove the expired ones.
    ///
    /// Each removed effect's removal hook runs exactly once. Returns the
    /// kinds removed.
    pub fn on_turn_start(&mut self) -> Vec<StatusEffectKind> {
        for effect in &mut self.effects {
            effect.on_turn_start(&mut self.pools);
        }

        let mut removed = Vec::new();
        let pools = &mut self.pools;
        let owner = self.display_name.as_str();
        self.effects.retain(|effect| {
            if effect.is_expired() {
                effect.on_remove(pools, owner);
                removed.push(effect.kind());
                false
            } else {
                true
            }
        });
        removed
    }
}

//! Status effects.
//!
//! Effects are a closed set of kinds. Each active effect follows the same
//! lifecycle:
//!
//! 1. `modify_damage` folds incoming damage while active
//! 2. `on_turn_start` ticks once at the owner's turn start
//! 3. once `is_expired`, the owner removes it and calls `on_remove` exactly once
//!
//! Effects are permanent unless created with a duration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::pools::Pools;

/// Kinds of status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffectKind {
    /// Incoming damage is halved (rounded down).
    Weaken,
}

impl StatusEffectKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            StatusEffectKind::Weaken => "Weaken",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            StatusEffectKind::Weaken => "Damage taken is halved.",
        }
    }
}

impl std::fmt::Display for StatusEffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An active status effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    kind: StatusEffectKind,
    /// Turns left; `None` is permanent.
    remaining: Option<u32>,
}

impl StatusEffect {
    #[must_use]
    pub fn permanent(kind: StatusEffectKind) -> Self {
        Self {
            kind,
            remaining: None,
        }
    }

    /// An effect that expires after `turns` of the owner's turn starts.
    #[must_use]
    pub fn timed(kind: StatusEffectKind, turns: u32) -> Self {
        Self {
            kind,
            remaining: Some(turns),
        }
    }

    #[must_use]
    pub fn kind(&self) -> StatusEffectKind {
        self.kind
    }

    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Transform incoming damage.
    #[must_use]
    pub fn modify_damage(&self, amount: u32) -> u32 {
        match self.kind {
            StatusEffectKind::Weaken => amount / 2,
        }
    }

    /// Tick at the owner's turn start.
    pub fn on_turn_start(&mut self, _pools: &mut Pools) {
        if let Some(turns) = self.remaining.as_mut() {
            *turns = turns.saturating_sub(1);
        }
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Removal hook.
    pub fn on_remove(&self, _pools: &mut Pools, owner: &str) {
        debug!(owner, effect = %self.kind, "status effect removed");
    }
}
